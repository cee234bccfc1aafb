use leptos::prelude::*;

use crate::engine::autocomplete::Autocomplete;

/// School search box with a bounded suggestion list.
///
/// Typing filters the list; picking a suggestion fills the box, closes the
/// list and hands the name to `on_select`.
#[component]
pub fn SchoolSearch(
    autocomplete: RwSignal<Autocomplete>,
    #[prop(into)] on_select: Callback<String>,
) -> impl IntoView {
    let is_open = move || autocomplete.with(|ac| ac.is_open());

    let on_input = move |ev: leptos::ev::Event| {
        let value = event_target_value(&ev);
        autocomplete.update(|ac| ac.set_query(&value));
    };

    let pick = move |name: String| {
        let chosen = autocomplete.try_update(|ac| ac.select(&name));
        if let Some(chosen) = chosen {
            on_select.run(chosen);
        }
    };

    // Close the list on any mousedown outside the container
    let container_ref = NodeRef::<leptos::html::Div>::new();

    Effect::new(move |registered: Option<bool>| {
        use wasm_bindgen::prelude::*;
        use wasm_bindgen::JsCast;

        if registered == Some(true) {
            return true;
        }
        let Some(container) = container_ref.get() else {
            return false;
        };
        let Some(window) = web_sys::window() else {
            return false;
        };

        let closure = Closure::<dyn Fn(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
            if let Some(target) = ev.target() {
                if let Some(node) = target.dyn_ref::<web_sys::Node>() {
                    if !container.contains(Some(node)) {
                        autocomplete.update(|ac| ac.dismiss());
                    }
                }
            }
        });

        let _ = window
            .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
        closure.forget();
        true
    });

    view! {
        <div class="search-container" node_ref=container_ref>
            <input
                type="text"
                class="search-input"
                placeholder="Search schools..."
                prop:value=move || autocomplete.with(|ac| ac.query().to_string())
                on:input=on_input
            />

            <Show when=is_open>
                <div class="autocomplete-items">
                    <For
                        each=move || autocomplete.with(|ac| ac.suggestions().to_vec())
                        key=|name| name.clone()
                        children=move |name| {
                            let label = name.clone();
                            view! {
                                <div
                                    class="suggestion-item"
                                    on:mousedown=move |_| pick(name.clone())
                                >
                                    {label}
                                </div>
                            }
                        }
                    />
                </div>
            </Show>
        </div>
    }
}
