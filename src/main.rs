use leptos::prelude::*;
use outbreak_globe::{App, init_logging};

fn main() {
	init_logging();
	mount_to_body(App)
}
