use leptos::prelude::*;

use crate::components::outbreak::OutbreakGlobe;
use crate::components::social_monitor::SocialMonitor;

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let monitor_open = RwSignal::new(false);

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

			<div class="fullscreen-globe">
				<OutbreakGlobe fullscreen=true />
				<div class="globe-overlay">
					<h1>"Outbreak Spread"</h1>
					<p class="subtitle">"Space starts or pauses the spread, R resets. Drag to rotate, scroll to zoom."</p>
				</div>
			</div>
			<button id="toggle-monitor" on:click=move |_| monitor_open.update(|open| *open = !*open)>
				"Misinformation Monitor"
			</button>
			<div class="monitor-drawer" class:open=move || monitor_open.get()>
				<SocialMonitor />
			</div>
		</ErrorBoundary>
	}
}
