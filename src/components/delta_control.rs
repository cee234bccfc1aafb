use leptos::prelude::*;

use crate::engine::session::{mirror_field_text, parse_delta_input};

/// Slider and number field bound to the same investment delta (percent).
///
/// The slider always renders from `value`. The number field keeps its own
/// text while focused and catches up with `value` on blur.
#[component]
pub fn DeltaControl(
    #[prop(into)] value: Signal<f64>,
    min: f64,
    max: f64,
    #[prop(into)] on_edit: Callback<f64>,
) -> impl IntoView {
    let (field_text, set_field_text) = signal(value.get_untracked().to_string());
    let (focused, set_focused) = signal(false);

    Effect::new(move |_| {
        let v = value.get();
        let next = field_text.with_untracked(|t| mirror_field_text(t, v, focused.get_untracked()));
        if let Some(text) = next {
            set_field_text.set(text);
        }
    });

    let on_slider = move |ev: leptos::ev::Event| {
        if let Some(v) = parse_delta_input(&event_target_value(&ev)) {
            on_edit.run(v);
        }
    };

    let on_field = move |ev: leptos::ev::Event| {
        let text = event_target_value(&ev);
        if let Some(v) = parse_delta_input(&text) {
            on_edit.run(v);
        }
        set_field_text.set(text);
    };

    let on_blur = move |_: leptos::ev::FocusEvent| {
        set_focused.set(false);
        let v = value.get_untracked();
        let next = field_text.with_untracked(|t| mirror_field_text(t, v, false));
        if let Some(text) = next {
            set_field_text.set(text);
        }
    };

    view! {
        <div class="delta-control">
            <span class="delta-label">"Investment Level"</span>
            <input
                id="delta-slider"
                type="range"
                class="delta-slider"
                min=min.to_string()
                max=max.to_string()
                step="1"
                prop:value=move || value.get().to_string()
                on:input=on_slider
            />
            <div class="delta-field-wrapper">
                <input
                    id="delta-input"
                    type="number"
                    class="delta-input input"
                    min=min.to_string()
                    max=max.to_string()
                    prop:value=move || field_text.get()
                    on:input=on_field
                    on:focus=move |_| set_focused.set(true)
                    on:blur=on_blur
                />
                <span class="delta-unit">"%"</span>
            </div>
        </div>
    }
}
