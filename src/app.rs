use leptos::prelude::*;
use leptos_router::components::*;
use leptos_router::path;

use crate::components::sidebar::Sidebar;
use crate::config::DashboardConfig;
use crate::pages::analytics::AnalyticsPage;
use crate::pages::explorer::ExplorerPage;

#[component]
pub fn App(config: DashboardConfig) -> impl IntoView {
    provide_context(config);

    view! {
        <Router>
            <div class="app-layout">
                <Sidebar />
                <main class="content">
                    <Routes fallback=|| view! { <p>"Page not found"</p> }>
                        <Route path=path!("/") view=ExplorerPage />
                        <Route path=path!("/analytics") view=AnalyticsPage />
                    </Routes>
                </main>
            </div>
        </Router>
    }
}
