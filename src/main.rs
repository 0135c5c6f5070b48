//! Client entrypoint for the CSR build.

// The bin pulls in the lib's whole dependency set; keep the lint quiet.
#![allow(unused_crate_dependencies)]

use leptos::prelude::*;
use particle_backdrop::{App, init_logging};

fn main() {
	init_logging();

	mount_to_body(|| {
		view! { <App /> }
	})
}
