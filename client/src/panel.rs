use leptos::prelude::*;

use cadastre_shared::view::format_zoom;
use cadastre_shared::{ColoringAttribute, ViewEvent};

use crate::app::{Dispatcher, PageRegions};

/// Flips between the flat and extruded views. The label names the next view.
#[component]
pub fn ViewToggle(dispatcher: Dispatcher, page: PageRegions) -> impl IntoView {
    view! {
        <button
            id="view-toggle"
            class="view-toggle"
            on:click=move |_| dispatcher.dispatch(ViewEvent::ToggleDimensionality)
        >
            {move || page.toggle_label.get()}
        </button>
    }
}

#[component]
pub fn AttributeSelect(dispatcher: Dispatcher, page: PageRegions) -> impl IntoView {
    let on_change = move |ev: leptos::ev::Event| {
        let key = event_target_value(&ev);
        // Options only carry registered keys; anything else is a broken page.
        if let Err(e) = dispatcher.select_key(&key) {
            panic!("{e}");
        }
    };

    view! {
        <label class="attribute-select">
            <span>"Color by"</span>
            <select
                id="coloring-mode"
                on:change=on_change
                prop:value=move || page.state.get().attribute.key()
            >
                {ColoringAttribute::ALL
                    .into_iter()
                    .map(|attribute| {
                        view! { <option value=attribute.key()>{attribute.label()}</option> }
                    })
                    .collect_view()}
            </select>
        </label>
    }
}

/// Readout text; `--` until the engine reports a zoom.
fn zoom_text(zoom: Option<f64>) -> String {
    zoom.map(format_zoom).unwrap_or_else(|| "--".to_string())
}

#[component]
pub fn ZoomReadout(page: PageRegions) -> impl IntoView {
    view! {
        <div class="zoom-readout">
            "Zoom: "
            <span id="zoom-value">
                {move || zoom_text(page.zoom.get())}
            </span>
        </div>
    }
}

#[component]
pub fn LegendPanel(page: PageRegions) -> impl IntoView {
    view! {
        <section id="legend" class="legend">
            <h3>{move || page.legend.get().title}</h3>
            <ul>
                {move || {
                    page.legend
                        .get()
                        .entries
                        .iter()
                        .map(|entry| {
                            let swatch = format!("background-color: {}", entry.color.hex());
                            view! {
                                <li>
                                    <span class="swatch" style=swatch></span>
                                    {entry.label}
                                </li>
                            }
                        })
                        .collect_view()
                }}
            </ul>
        </section>
    }
}
