use leptos::prelude::*;

#[component]
pub fn Sidebar() -> impl IntoView {
    view! {
        <nav class="sidebar">
            <div class="sidebar-header">
                <h1 class="sidebar-title">"CampusLens"</h1>
                <p class="sidebar-subtitle">"School Happiness Explorer"</p>
            </div>
            <ul class="nav-list">
                <li class="nav-item">
                    <a href="/" class="nav-link">"What-If Explorer"</a>
                </li>
                <li class="nav-item">
                    <a href="/analytics" class="nav-link">"Rankings"</a>
                </li>
            </ul>
        </nav>
    }
}
