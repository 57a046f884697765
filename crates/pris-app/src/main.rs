//! PrisSjekk - WASM entry point

mod app;

use app::App;

fn main() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default_with_config(
        tracing_wasm::WASMLayerConfigBuilder::new()
            .set_max_level(tracing::Level::DEBUG)
            .build(),
    );

    tracing::info!("Starting PrisSjekk v{}", env!("CARGO_PKG_VERSION"));
    leptos::mount::mount_to_body(App);
}
