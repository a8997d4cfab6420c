use std::time::Duration;

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{info, warn};
use wasm_bindgen_futures::JsFuture;
use web_sys::MouseEvent;

use super::analysis::{Analysis, CustomRequest, compose_reply};
use super::data::{find_post, sample_posts};

/// Stand-in for the round trip to an analysis backend.
const SIMULATED_LATENCY: Duration = Duration::from_millis(1500);
const COPIED_FEEDBACK: Duration = Duration::from_millis(2000);

#[derive(Clone, Copy, PartialEq)]
enum Request {
	Analyze,
	Reply,
}

/// Copy button feedback once the clipboard write settles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum CopyStatus {
	#[default]
	Idle,
	Copied,
	Failed,
}

impl CopyStatus {
	fn settle<T, E: std::fmt::Debug>(result: Result<T, E>) -> Self {
		match result {
			Ok(_) => CopyStatus::Copied,
			Err(e) => {
				warn!("Clipboard write failed: {:?}", e);
				CopyStatus::Failed
			}
		}
	}

	fn label(self) -> &'static str {
		match self {
			CopyStatus::Idle => "Copy Reply",
			CopyStatus::Copied => "Copied!",
			CopyStatus::Failed => "Copy failed",
		}
	}
}

/// Mock misinformation monitor over a fixed set of sample posts.
#[component]
pub fn SocialMonitor() -> impl IntoView {
	let selected = RwSignal::new(None::<&'static str>);
	let loading = RwSignal::new(false);
	let analysis = RwSignal::new(None::<Analysis>);
	let form = RwSignal::new(CustomRequest::default());
	let notice = RwSignal::new(None::<String>);
	let copied = RwSignal::new(CopyStatus::Idle);
	let reply_ref = NodeRef::<leptos::html::Div>::new();

	let scroll_to_reply = move || {
		if let Some(el) = reply_ref.get_untracked() {
			el.scroll_into_view();
		}
	};

	let request = move |post_id: Option<&'static str>, kind: Request| {
		let Some(id) = post_id.or_else(|| selected.get_untracked()) else {
			notice.set(Some("Please select a post first".into()));
			return;
		};
		notice.set(None);
		loading.set(true);
		set_timeout(
			move || {
				match find_post(id) {
					Some(post) => {
						info!("Analyzed {}", id);
						analysis.set(Some(Analysis::from_post(&post)));
						form.set(CustomRequest::prefill(&post));
					}
					None => warn!("Unknown post {}", id),
				}
				loading.set(false);
				if kind == Request::Reply {
					scroll_to_reply();
				}
			},
			SIMULATED_LATENCY,
		);
	};

	let custom_analysis = move |_: MouseEvent| {
		loading.set(true);
		set_timeout(
			move || {
				let req = form.get_untracked();
				let reply = compose_reply(&req);
				analysis.update(|a| {
					let a = a.get_or_insert_with(Analysis::default);
					a.info = req.info();
					a.reply = reply;
				});
				loading.set(false);
				scroll_to_reply();
			},
			SIMULATED_LATENCY,
		);
	};

	let copy_reply = move |_: MouseEvent| {
		let Some(text) = analysis.with_untracked(|a| a.as_ref().map(|a| a.reply.clone())) else {
			return;
		};
		let Some(window) = web_sys::window() else {
			return;
		};
		let promise = window.navigator().clipboard().write_text(&text);
		spawn_local(async move {
			copied.set(CopyStatus::settle(JsFuture::from(promise).await));
			set_timeout(move || copied.set(CopyStatus::Idle), COPIED_FEEDBACK);
		});
	};

	let posts = sample_posts()
		.into_iter()
		.map(|post| {
			let id = post.id;
			view! {
				<div
					id=id
					class="post"
					class:selected=move || selected.get() == Some(id)
					on:click=move |_| selected.set(Some(id))
				>
					<p class="post-author">{post.author}</p>
					<p class="post-content">{post.content}</p>
					<div class="post-actions">
						<button on:click=move |_| request(Some(id), Request::Analyze)>"Analyze"</button>
						<button on:click=move |_| request(Some(id), Request::Reply)>"Generate Reply"</button>
					</div>
				</div>
			}
		})
		.collect_view();

	view! {
		<section class="social-monitor">
			<div class="posts">
				<h2>"Social Feed"</h2>
				{posts}
				<div class="feed-actions">
					<button on:click=move |_| request(None, Request::Analyze)>"Analyze Selected"</button>
					<button on:click=move |_| request(None, Request::Reply)>"Reply to Selected"</button>
				</div>
				{move || notice.get().map(|n| view! { <p class="notice">{n}</p> })}
			</div>

			<div class="analysis">
				<div id="loading-indicator" style:display=move || if loading.get() { "block" } else { "none" }>
					"Analyzing..."
				</div>
				<p
					id="initial-message"
					style:display=move || {
						if loading.get() || analysis.with(Option::is_some) { "none" } else { "block" }
					}
				>
					"Select a post and click Analyze to check it for misinformation."
				</p>
				<div
					id="analysis-content"
					style:display=move || {
						if !loading.get() && analysis.with(Option::is_some) { "block" } else { "none" }
					}
				>
					{move || {
						analysis
							.get()
							.map(|a| {
								view! {
									<h3 id="disease-name">{a.info.disease.clone()}</h3>
									<div id="symptoms-tags">
										{a.info.symptoms.iter().map(|s| view! { <span class="tag symptom">{s.clone()}</span> }).collect_view()}
									</div>
									<p>"Origins: " <span id="origin-locations">{a.info.origins.join(", ")}</span></p>
									<p>"Affected: " <span id="affected-locations">{a.info.affected.join(", ")}</span></p>
									<div id="corrections-list">
										{a.corrections.iter().map(|c| view! { <p>{c.clone()}</p> }).collect_view()}
									</div>
									<p class="analysis-time">"Analyzed " <span id="analysis-time">{a.analyzed_at.clone()}</span></p>
								}
							})
					}}
					<div class="generated-reply" node_ref=reply_ref>
						<p id="reply-content">
							{move || analysis.with(|a| a.as_ref().map(|a| a.reply.clone()).unwrap_or_default())}
						</p>
						<button id="copy-reply" on:click=copy_reply>
							{move || copied.get().label()}
						</button>
					</div>
				</div>

				<form class="custom-analysis" on:submit=move |ev| ev.prevent_default()>
					<label>"Disease"
						<input
							id="disease-input"
							prop:value=move || form.with(|f| f.disease.clone())
							on:input=move |ev| form.update(|f| f.disease = event_target_value(&ev))
						/>
					</label>
					<label>"Symptoms"
						<input
							id="symptoms-input"
							prop:value=move || form.with(|f| f.symptoms.clone())
							on:input=move |ev| form.update(|f| f.symptoms = event_target_value(&ev))
						/>
					</label>
					<label>"Origins"
						<input
							id="origins-input"
							prop:value=move || form.with(|f| f.origins.clone())
							on:input=move |ev| form.update(|f| f.origins = event_target_value(&ev))
						/>
					</label>
					<label>"Affected"
						<input
							id="affected-input"
							prop:value=move || form.with(|f| f.affected.clone())
							on:input=move |ev| form.update(|f| f.affected = event_target_value(&ev))
						/>
					</label>
					<label>"Post"
						<textarea
							id="post-input"
							prop:value=move || form.with(|f| f.post_text.clone())
							on:input=move |ev| form.update(|f| f.post_text = event_target_value(&ev))
						/>
					</label>
					<button type="button" on:click=custom_analysis>"Custom Analysis"</button>
				</form>
			</div>
		</section>
	}
}
