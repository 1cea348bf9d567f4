//! Runtime adapter: browser microtask queue and timers.

use futures::future::LocalBoxFuture;
use gloo_timers::future::TimeoutFuture;

use chat_core::ports::Spawner;

#[derive(Debug, Default, Clone, Copy)]
pub struct WasmSpawner;

impl Spawner for WasmSpawner {
    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        wasm_bindgen_futures::spawn_local(task);
    }

    fn sleep(&self, ms: u64) -> LocalBoxFuture<'static, ()> {
        let ms = u32::try_from(ms).unwrap_or(u32::MAX);
        Box::pin(TimeoutFuture::new(ms))
    }
}
