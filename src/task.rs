use std::future::Future;

cfg_if::cfg_if! {
    if #[cfg(target_family = "wasm")] {
        /// The browser cannot block, so the future is handed to its event loop.
        pub fn block_on<F>(future: F)
        where
            F: Future<Output = ()> + 'static,
        {
            wasm_bindgen_futures::spawn_local(future);
        }
    } else {
        pub fn block_on<F>(future: F)
        where
            F: Future<Output = ()> + 'static,
        {
            async_std::task::block_on(future);
        }
    }
}
