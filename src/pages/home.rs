use leptos::prelude::*;
use log::{info, warn};

use crate::components::blueprint_graph::{BlueprintGraphCanvas, GraphData};

/// Companies and contracts shown before anything else is loaded.
const SAMPLE_BLUEPRINT: &str = r#"{
  "nodes": [
    {"id": "A", "label": "TONY HK LTD", "group": "HK"},
    {"id": "B", "label": "TONY US LLC", "group": "US"},
    {"id": "C", "label": "TWOJE US LLC", "group": "US"},
    {"id": "D", "label": "TWOJA HK AGENCY", "group": "HK"},
    {"id": "FB", "label": "Facebook/Google Ads"},
    {"id": "SUP", "label": "Dostawca Towaru"}
  ],
  "edges": [
    {"source": "A", "target": "C", "label": "KONTRAKT #1: PERFORMANCE", "style": "solid"},
    {"source": "B", "target": "D", "label": "KONTRAKT #2: STRATEGIA", "style": "solid"},
    {"source": "C", "target": "FB", "label": "Płatność kartą", "style": "dashed"},
    {"source": "A", "target": "SUP", "label": "Płatność", "style": "dashed"}
  ]
}"#;

fn sample_data() -> GraphData {
	GraphData::from_json(SAMPLE_BLUEPRINT).unwrap_or_else(|err| {
		warn!("sample blueprint rejected: {err}");
		GraphData::default()
	})
}

/// Badge text with the size of the supplied snapshot.
fn summary(data: &GraphData) -> String {
	format!("{} nodes • {} edges", data.nodes.len(), data.edges.len())
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let (graph_data, set_graph_data) = signal(sample_data());
	let (payload, set_payload) = signal(SAMPLE_BLUEPRINT.to_string());
	let (load_error, set_load_error) = signal(None::<String>);

	let load = move |_| match GraphData::from_json(&payload.get()) {
		Ok(data) => {
			info!("loaded snapshot: {}", summary(&data));
			set_load_error.set(None);
			set_graph_data.set(data);
		}
		Err(err) => {
			warn!("snapshot rejected: {err}");
			set_load_error.set(Some(err.to_string()));
		}
	};

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="blueprint-page">
				<header class="blueprint-header">
					<h1>"Blueprint Imperium"</h1>
					<p class="subtitle">"Companies, contracts and payments. Scroll to zoom. Drag to pan. Hover to trace relations."</p>
				</header>

				<div class="blueprint-grid">
					<section class="blueprint-input">
						<label for="snapshot">"Graph snapshot (JSON)"</label>
						<textarea
							id="snapshot"
							prop:value=payload
							on:input=move |ev| set_payload.set(event_target_value(&ev))
						></textarea>
						{move || load_error.get().map(|e| view! { <div class="error">{e}</div> })}
						<button on:click=load>"Load graph"</button>
					</section>

					<section class="blueprint-view">
						<div class="blueprint-view-header">
							<h2>"Structures and contracts"</h2>
							<span class="badge">{move || summary(&graph_data.get())}</span>
						</div>
						<div class="graph-frame">
							<BlueprintGraphCanvas data=graph_data />
						</div>
					</section>
				</div>
			</div>
		</ErrorBoundary>
	}
}
