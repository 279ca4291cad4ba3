use likebtn::prelude::*;
use likebtn::runtime;

fn config() -> Config {
    tracing_wasm::set_as_global_default_with_config(
        tracing_wasm::WASMLayerConfigBuilder::default()
            .set_max_level(tracing::Level::DEBUG)
            .build(),
    );

    runtime::page_config("likebtn-config").unwrap_or_else(|err| {
        tracing::error!("falling back to default config: {err}");
        Config::default()
    })
}

likebtn::start!(config());
