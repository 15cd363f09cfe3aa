use leptos::prelude::*;
use mlviz::presenter::{display_subtitle, ChartDescriptor, DatasetButton};
use mlviz::prelude::*;
use mlviz::projector::FilterButton;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{spawn_local, JsFuture};

use crate::ui_model::{status_line, CardAccent};

mod charts;

const PAGE_BG: &str = "linear-gradient(to bottom, #111827, #1f2937, #111827)";
const PANEL_STYLE: &str = "background: rgba(17, 24, 39, 0.5); border: 1px solid rgba(55, 65, 81, 0.5); border-radius: 10px; padding: 14px;";

pub fn start() {
    mount_to_body(|| view! { <App /> });
}

fn render(dash: StoredValue<Dashboard>) -> Result<DashboardView, String> {
    dash.with_value(|d| d.render().map_err(|e| e.to_string()))
}

/// Resolves on the next macrotask, after the browser had a chance to paint.
fn next_tick() -> js_sys::Promise {
    js_sys::Promise::new(&mut |resolve, _reject| {
        let scheduled = web_sys::window().and_then(|w| {
            w.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, 0)
                .ok()
        });
        if scheduled.is_none() {
            let _ = resolve.call0(&JsValue::NULL);
        }
    })
}

#[component]
fn App() -> impl IntoView {
    let dash = match Dashboard::seeded(js_sys::Date::now() as u64) {
        Ok(d) => d,
        Err(e) => {
            return view! { <ErrorBanner message=e.to_string() /> }.into_any();
        }
    };
    let theme = dash.theme().clone();
    let dash = StoredValue::new(dash);

    let (view_state, set_view_state) = signal(render(dash));
    let (status, set_status) = signal(String::new());

    let refresh = move || set_view_state.set(render(dash));

    let report = move |outcome: Option<Result<Mutation>>| {
        if let Some(outcome) = outcome {
            set_status.set(status_line(&outcome));
        }
    };

    let on_category = Callback::new(move |value: &'static str| {
        let parsed = value.parse::<CategoryFilter>();
        if let Ok(f) = parsed {
            dash.update_value(|d| d.select_category(f));
        }
        set_status.set(status_line(&parsed));
        refresh();
    });

    let on_type = Callback::new(move |value: &'static str| {
        let parsed = value.parse::<TypeFilter>();
        if let Ok(f) = parsed {
            dash.update_value(|d| d.select_type(f));
        }
        set_status.set(status_line(&parsed));
        refresh();
    });

    let on_dataset = Callback::new(move |(algorithm_id, dataset_id): (String, String)| {
        let mut res = None;
        dash.update_value(|d| res = Some(d.select_dataset(&algorithm_id, &dataset_id)));
        report(res);
        refresh();
    });

    // Loading is shown for at least one frame: request, paint, then complete.
    let on_epochs = Callback::new(move |(algorithm_id, epochs): (String, u32)| {
        let mut requested = None;
        dash.update_value(|d| requested = Some(d.request_epochs(&algorithm_id, epochs)));
        let Some(requested) = requested else {
            return;
        };
        set_status.set(status_line(&requested));
        let Ok(pending) = requested else {
            return;
        };
        refresh();

        spawn_local(async move {
            let _ = JsFuture::from(next_tick()).await;
            let mut done = None;
            dash.update_value(|d| done = Some(d.complete_epochs(pending)));
            report(done);
            refresh();
        });
    });

    view! {
        <main style=format!("min-height: 100vh; background: {PAGE_BG}; color: #e5e7eb; font-family: system-ui, -apple-system, Segoe UI, Roboto, sans-serif; padding: 24px;")>
            <header style="max-width: 1200px; margin: 0 auto 20px auto;">
                <h1 style="margin: 0 0 6px 0; color: #fff;">"ML Algorithm Visualizer"</h1>
                <p style="margin: 0; color: #9ca3af;">
                    "Explore how machine learning algorithms behave on different datasets."
                </p>
            </header>

            <section style="max-width: 1200px; margin: 0 auto 20px auto; display: grid; gap: 10px;">
                <FilterRow
                    label="Category"
                    buttons=move || view_state.get().map(|v| v.filter_bar.category).unwrap_or_default()
                    on_select=on_category
                />
                <FilterRow
                    label="Type"
                    buttons=move || view_state.get().map(|v| v.filter_bar.algorithm_type).unwrap_or_default()
                    on_select=on_type
                />
                <Show when=move || !status.get().is_empty()>
                    <div style="color: #fca5a5; font-size: 0.9em;">{move || status.get()}</div>
                </Show>
            </section>

            <section style="max-width: 1200px; margin: 0 auto; display: grid; grid-template-columns: repeat(auto-fill, minmax(520px, 1fr)); gap: 20px;">
                {move || match view_state.get() {
                    Ok(v) if v.cards.is_empty() => view! {
                        <p style="color: #9ca3af;">"No algorithms match the selected filters."</p>
                    }
                    .into_any(),
                    Ok(v) => {
                        let theme = theme.clone();
                        v.cards
                            .into_iter()
                            .map(|card| {
                                view! {
                                    <Card
                                        card=card
                                        theme=theme.clone()
                                        on_dataset=on_dataset
                                        on_epochs=on_epochs
                                    />
                                }
                            })
                            .collect_view()
                            .into_any()
                    }
                    Err(e) => view! { <ErrorBanner message=e /> }.into_any(),
                }}
            </section>
        </main>
    }
    .into_any()
}

#[component]
fn FilterRow(
    label: &'static str,
    buttons: impl Fn() -> Vec<FilterButton> + Send + Sync + 'static,
    on_select: Callback<&'static str>,
) -> impl IntoView {
    view! {
        <div style="display: flex; gap: 8px; align-items: center; flex-wrap: wrap;">
            <span style="min-width: 78px; color: #9ca3af;">{label}</span>
            {move || {
                buttons()
                    .into_iter()
                    .map(|b| {
                        let style = if b.active {
                            "padding: 6px 12px; border-radius: 6px; border: none; background: #4f46e5; color: #fff;"
                        } else {
                            "padding: 6px 12px; border-radius: 6px; border: none; background: #1f2937; color: #d1d5db;"
                        };
                        let value = b.value;
                        view! {
                            <button style=style on:click=move |_| on_select.run(value)>
                                {b.caption}
                            </button>
                        }
                    })
                    .collect_view()
            }}
        </div>
    }
}

#[component]
fn Card(
    card: AlgorithmCard,
    theme: ChartTheme,
    on_dataset: Callback<(String, String)>,
    on_epochs: Callback<(String, u32)>,
) -> impl IntoView {
    let accent = CardAccent::for_type(card.algorithm_type);
    let subtitle = display_subtitle(&card);
    let spinner_opacity = if card.loading.is_loading() { "1" } else { "0" };

    let algorithm_id = card.id.clone();
    let dataset_buttons = card
        .dataset
        .buttons
        .into_iter()
        .map(|DatasetButton { id, name, active }| {
            let algorithm_id = algorithm_id.clone();
            let style = if active {
                "padding: 5px 10px; border-radius: 6px; border: none; background: #4f46e5; color: #fff; font-size: 0.85em;"
            } else {
                "padding: 5px 10px; border-radius: 6px; border: none; background: #1f2937; color: #d1d5db; font-size: 0.85em;"
            };
            view! {
                <button
                    style=style
                    on:click=move |_| on_dataset.run((algorithm_id.clone(), id.clone()))
                >
                    {name}
                </button>
            }
        })
        .collect_view();

    let features = card
        .dataset
        .features
        .into_iter()
        .map(|f| {
            view! {
                <span style="padding: 2px 8px; border-radius: 999px; background: rgba(31, 41, 55, 0.5); border: 1px solid rgba(55, 65, 81, 0.5); font-size: 0.75em;">
                    {f}
                </span>
            }
        })
        .collect_view();

    let current = card.epochs.current;
    let epoch_options = card
        .epochs
        .choices
        .into_iter()
        .map(|n| {
            view! {
                <option value=n.to_string() selected={n == current}>
                    {n.to_string()}
                </option>
            }
        })
        .collect_view();

    let epoch_id = card.id.clone();

    view! {
        <article style=format!("border-radius: 12px; padding: 20px; border: 1px solid rgba(55, 65, 81, 0.5); background: {}; display: grid; gap: 14px;", accent.gradient())>
            <div style="display: flex; justify-content: space-between; align-items: center;">
                <div style="display: flex; gap: 12px; align-items: center;">
                    <div style=format!("font-size: 1.5em; padding: 8px; border-radius: 8px; background: rgba(17, 24, 39, 0.5); color: {};", accent.icon_color())>
                        {accent.icon()}
                    </div>
                    <div>
                        <h3 style="margin: 0; color: #fff;">{card.name}</h3>
                        <p style="margin: 0; color: #9ca3af;">{subtitle}</p>
                    </div>
                </div>
                <span
                    title="Updating"
                    style=format!("color: #818cf8; transition: opacity 300ms; opacity: {spinner_opacity};")
                >
                    "⟳"
                </span>
            </div>

            <p style="margin: 0; color: #d1d5db;">{card.description}</p>

            <div style=PANEL_STYLE>
                <h4 style="margin: 0 0 10px 0; color: #e5e7eb;">"Dataset Selection"</h4>
                <div style="display: flex; gap: 8px; margin-bottom: 10px;">{dataset_buttons}</div>
                <div style="display: grid; grid-template-columns: 1fr 1fr; gap: 10px; margin-bottom: 8px;">
                    <div>
                        <div style="color: #9ca3af; font-size: 0.85em;">"Samples"</div>
                        <div>{card.dataset.samples.to_string()}</div>
                    </div>
                    <div>
                        <div style="color: #9ca3af; font-size: 0.85em;">"Source"</div>
                        <div>{card.dataset.source}</div>
                    </div>
                </div>
                <div style="color: #9ca3af; font-size: 0.85em;">"Features"</div>
                <div style="display: flex; flex-wrap: wrap; gap: 6px; margin-top: 4px;">{features}</div>
            </div>

            <div style=PANEL_STYLE>
                <div style="display: flex; justify-content: space-between; align-items: center; margin-bottom: 10px;">
                    <h4 style="margin: 0; color: #e5e7eb;">"Training Control"</h4>
                    <label style="display: flex; gap: 8px; align-items: center; color: #9ca3af; font-size: 0.9em;">
                        "Epochs:"
                        <select
                            style="background: #1f2937; color: #d1d5db; border: 1px solid #374151; border-radius: 6px; padding: 2px 6px;"
                            prop:value=current.to_string()
                            on:change=move |ev| {
                                if let Ok(n) = event_target_value(&ev).parse::<u32>() {
                                    on_epochs.run((epoch_id.clone(), n));
                                }
                            }
                        >
                            {epoch_options}
                        </select>
                    </label>
                </div>
                <Chart chart={card.chart} theme=theme />
            </div>

            <MetricsTableView table={card.table} />
        </article>
    }
}

#[component]
fn Chart(chart: ChartDescriptor, theme: ChartTheme) -> impl IntoView {
    let canvas_ref = NodeRef::<leptos::html::Canvas>::new();

    Effect::new(move |_| {
        if let Some(canvas) = canvas_ref.get() {
            if let Err(e) = charts::draw_chart(&canvas, &chart, &theme) {
                web_sys::console::warn_1(&JsValue::from_str(&format!("chart: {e}")));
            }
        }
    });

    view! {
        <canvas
            node_ref=canvas_ref
            width="520"
            height="256"
            style="width: 100%; height: 256px; display: block;"
        ></canvas>
    }
}

#[component]
fn MetricsTableView(table: MetricsTable) -> impl IntoView {
    if table.is_empty() {
        return view! { <p style="margin: 0; color: #9ca3af;">"No iterations recorded."</p> }
            .into_any();
    }

    let header = table
        .header()
        .into_iter()
        .map(|h| {
            let h = h.to_string();
            view! { <th style="text-align: left; padding: 6px 10px; color: #9ca3af; font-weight: 600;">{h}</th> }
        })
        .collect_view();

    let rows = table
        .rows
        .into_iter()
        .map(|row| {
            let cells = row
                .cells
                .into_iter()
                .map(|c| view! { <td style="padding: 4px 10px; font-variant-numeric: tabular-nums;">{c}</td> })
                .collect_view();
            view! {
                <tr style="border-top: 1px solid rgba(55, 65, 81, 0.5);">
                    <td style="padding: 4px 10px;">{row.epoch.to_string()}</td>
                    {cells}
                </tr>
            }
        })
        .collect_view();

    view! {
        <div style=format!("{PANEL_STYLE} overflow-x: auto; max-height: 260px; overflow-y: auto;")>
            <table style="width: 100%; border-collapse: collapse; font-size: 0.85em;">
                <thead><tr>{header}</tr></thead>
                <tbody>{rows}</tbody>
            </table>
        </div>
    }
    .into_any()
}

#[component]
fn ErrorBanner(message: String) -> impl IntoView {
    view! {
        <div style="padding: 10px 12px; background: #ff3b3018; border: 1px solid #ff3b3055; border-radius: 10px;">
            <div style="color: #ffb4ad; font-weight: 600;">"Error"</div>
            <div style="margin-top: 6px; white-space: pre-wrap; font-family: ui-monospace, monospace; font-size: 12px;">
                {message}
            </div>
        </div>
    }
}
