//! CSPR.click browser extension adapter (wasm only).
//!
//! Talks to `window.csprclick`. Every call returns a Promise resolving to an
//! object with a `success` flag plus call-specific fields.

use js_sys::{Function, Object, Promise, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use super::{ContractConfig, Receipt, ScoreSubmission, WalletAccount, WalletAdapter, WalletError};
use crate::console;

pub struct CsprClickWallet {
    config: ContractConfig,
    account: Option<WalletAccount>,
}

impl CsprClickWallet {
    pub fn new(config: ContractConfig) -> Self {
        Self { config, account: None }
    }

    fn extension() -> Result<JsValue, WalletError> {
        let window = web_sys::window().ok_or(WalletError::NotInstalled)?;
        let ext = Reflect::get(&window, &JsValue::from_str("csprclick"))
            .map_err(|_| WalletError::NotInstalled)?;
        if ext.is_undefined() || ext.is_null() {
            return Err(WalletError::NotInstalled);
        }
        Ok(ext)
    }

    /// Call `window.csprclick[method](arg)` and await the returned Promise.
    async fn call(method: &str, arg: &JsValue) -> Result<JsValue, WalletError> {
        let ext = Self::extension()?;
        let func: Function = Reflect::get(&ext, &JsValue::from_str(method))
            .map_err(js_error)?
            .dyn_into()
            .map_err(|_| WalletError::Js(format!("csprclick.{method} is not a function")))?;
        let ret = func.call1(&ext, arg).map_err(js_error)?;
        let promise: Promise = ret
            .dyn_into()
            .map_err(|_| WalletError::Js(format!("csprclick.{method} did not return a promise")))?;
        let response = JsFuture::from(promise).await.map_err(js_error)?;

        if !field(&response, "success").as_bool().unwrap_or(false) {
            let reason = field(&response, "error")
                .as_string()
                .unwrap_or_else(|| "user declined".into());
            return Err(WalletError::Rejected(reason));
        }
        Ok(response)
    }
}

fn field(obj: &JsValue, name: &str) -> JsValue {
    Reflect::get(obj, &JsValue::from_str(name)).unwrap_or(JsValue::UNDEFINED)
}

fn js_error(e: JsValue) -> WalletError {
    WalletError::Js(e.as_string().unwrap_or_else(|| format!("{e:?}")))
}

impl WalletAdapter for CsprClickWallet {
    async fn connect(&mut self) -> Result<WalletAccount, WalletError> {
        let response = Self::call("requestConnection", &JsValue::UNDEFINED).await?;
        let public_key = field(&response, "activeKey")
            .as_string()
            .ok_or_else(|| WalletError::Js("connection response has no activeKey".into()))?;
        let account = WalletAccount { public_key };
        console::log(&format!("wallet connected: {}", account.truncated()));
        self.account = Some(account.clone());
        Ok(account)
    }

    async fn sign(&mut self, payload: &str) -> Result<String, WalletError> {
        let account = self.account.as_ref().ok_or(WalletError::NotConnected)?;
        let request = Object::new();
        Reflect::set(&request, &"message".into(), &JsValue::from_str(payload)).map_err(js_error)?;
        Reflect::set(&request, &"signingPublicKey".into(), &JsValue::from_str(&account.public_key))
            .map_err(js_error)?;
        let response = Self::call("signMessage", &request.into()).await?;
        field(&response, "signature")
            .as_string()
            .ok_or_else(|| WalletError::Js("sign response has no signature".into()))
    }

    async fn submit(&mut self, score: &ScoreSubmission) -> Result<Receipt, WalletError> {
        let account = self.account.as_ref().ok_or(WalletError::NotConnected)?;
        if score.wallet_address != account.public_key {
            return Err(WalletError::Rejected(
                "score belongs to a different account".into(),
            ));
        }
        let contract_hash = self
            .config
            .contract_hash
            .as_deref()
            .ok_or(WalletError::ContractNotDeployed)?;
        score.check_plausibility()?;

        let params = score.deploy_params(&self.config, contract_hash);
        let json = serde_json::to_string(&params).map_err(|e| WalletError::Js(e.to_string()))?;
        let deploy = js_sys::JSON::parse(&json).map_err(js_error)?;

        let response = Self::call("send", &deploy).await?;
        let deploy_hash = field(&response, "deployHash")
            .as_string()
            .ok_or_else(|| WalletError::Js("send response has no deployHash".into()))?;
        console::log(&format!("score submitted, deploy {deploy_hash}"));
        Ok(Receipt { deploy_hash })
    }

    fn disconnect(&mut self) {
        self.account = None;
    }
}
