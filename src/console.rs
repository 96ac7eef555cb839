//! Console logging: the browser devtools console on wasm, stderr elsewhere.

const PREFIX: &str = "Stake Clicker";

pub fn log(msg: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::log_1(&format!("{PREFIX}: {msg}").into());
    #[cfg(not(target_arch = "wasm32"))]
    eprintln!("{PREFIX}: {msg}");
}

pub fn warn(msg: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::warn_1(&format!("{PREFIX}: {msg}").into());
    #[cfg(not(target_arch = "wasm32"))]
    eprintln!("{PREFIX} [warn]: {msg}");
}
