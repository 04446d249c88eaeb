//! Celebration effect for reaching the special value.
//!
//! The default trigger pops the `confetti-container` web component, which is
//! imported lazily by `confetti_loader.js`. Any failure on that path is
//! answered with a short scale pulse on the displayed number.

use crate::config::{POPPED_ATTR, PULSE_MS, PULSE_SCALE, PULSE_TRANSITION};
use futures::future::LocalBoxFuture;
use futures::{Future, FutureExt};
use gloo_timers::callback::Timeout;
use gloo_timers::future::TimeoutFuture;
use log::{debug, warn};
use std::fmt;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};
use yew::NodeRef;

#[wasm_bindgen(module = "/confetti_loader.js")]
extern "C" {
    #[wasm_bindgen(catch, js_name = loadConfetti)]
    async fn load_confetti() -> Result<JsValue, JsValue>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum CelebrationError {
    ModuleLoad(String),
    MissingContainer,
    Attribute(String),
}

impl fmt::Display for CelebrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CelebrationError::ModuleLoad(msg) => write!(f, "Confetti import failed: {}", msg),
            CelebrationError::MissingContainer => write!(f, "Confetti container is not mounted"),
            CelebrationError::Attribute(msg) => {
                write!(f, "Could not set the {} attribute: {}", POPPED_ATTR, msg)
            }
        }
    }
}

impl std::error::Error for CelebrationError {}

/// Anything that can play a one-shot celebration.
pub trait CelebrationTrigger {
    fn celebrate(&self) -> LocalBoxFuture<'static, Result<(), CelebrationError>>;
}

/// Shared trigger that can be passed through component props.
#[derive(Clone)]
pub struct TriggerHandle(pub Rc<dyn CelebrationTrigger>);

impl TriggerHandle {
    pub fn new(trigger: impl CelebrationTrigger + 'static) -> Self {
        Self(Rc::new(trigger))
    }
}

impl PartialEq for TriggerHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for TriggerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TriggerHandle")
    }
}

fn js_error_message(err: &JsValue) -> String {
    err.dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| err.as_string())
        .unwrap_or_else(|| format!("{:?}", err))
}

/// Pops the `confetti-container` element referenced by `container`.
pub struct ConfettiTrigger {
    container: NodeRef,
}

impl ConfettiTrigger {
    pub fn new(container: NodeRef) -> Self {
        Self { container }
    }
}

impl CelebrationTrigger for ConfettiTrigger {
    fn celebrate(&self) -> LocalBoxFuture<'static, Result<(), CelebrationError>> {
        let container = self.container.clone();
        async move {
            load_confetti()
                .await
                .map_err(|e| CelebrationError::ModuleLoad(js_error_message(&e)))?;

            // Give the freshly defined element one tick to upgrade.
            TimeoutFuture::new(0).await;

            let el = container
                .cast::<Element>()
                .ok_or(CelebrationError::MissingContainer)?;
            // Clear first so a second celebration is seen as a change.
            if let Err(e) = el.remove_attribute(POPPED_ATTR) {
                debug!("Could not clear {}: {}", POPPED_ATTR, js_error_message(&e));
            }
            el.set_attribute(POPPED_ATTR, "")
                .map_err(|e| CelebrationError::Attribute(js_error_message(&e)))
        }
        .boxed_local()
    }
}

/// Briefly scale up the number so the user still sees something happen.
pub fn pulse(number: &NodeRef) {
    let Some(el) = number.cast::<HtmlElement>() else {
        debug!("Pulse skipped, number element not mounted");
        return;
    };
    let style = el.style();
    let scale = format!("scale({})", PULSE_SCALE);
    for (prop, val) in [("transition", PULSE_TRANSITION), ("transform", scale.as_str())] {
        if let Err(e) = style.set_property(prop, val) {
            debug!("Pulse could not set {}: {}", prop, js_error_message(&e));
        }
    }

    Timeout::new(PULSE_MS, move || {
        if let Err(e) = el.style().remove_property("transform") {
            debug!("Pulse could not reset transform: {}", js_error_message(&e));
        }
    })
    .forget();
}

/// Await a celebration and run `fallback` if it failed.
pub async fn finish_celebration<F>(
    celebration: impl Future<Output = Result<(), CelebrationError>>,
    fallback: F,
) -> Result<(), CelebrationError>
where
    F: FnOnce(),
{
    let res = celebration.await;
    if let Err(err) = &res {
        warn!("{}, falling back to pulse", err);
        fallback();
    }
    res
}

/// Fire-and-forget: start the celebration without blocking the caller.
pub fn spawn_celebration(trigger: &TriggerHandle, number: NodeRef) {
    let celebration = trigger.0.celebrate();
    wasm_bindgen_futures::spawn_local(async move {
        let _ = finish_celebration(celebration, || pulse(&number)).await;
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::cell::Cell;

    struct CountingTrigger {
        calls: Rc<Cell<usize>>,
    }

    impl CelebrationTrigger for CountingTrigger {
        fn celebrate(&self) -> LocalBoxFuture<'static, Result<(), CelebrationError>> {
            self.calls.set(self.calls.get() + 1);
            async { Ok(()) }.boxed_local()
        }
    }

    struct BrokenTrigger;

    impl CelebrationTrigger for BrokenTrigger {
        fn celebrate(&self) -> LocalBoxFuture<'static, Result<(), CelebrationError>> {
            async { Err(CelebrationError::ModuleLoad("network down".into())) }.boxed_local()
        }
    }

    #[test]
    fn success_skips_fallback() {
        let calls = Rc::new(Cell::new(0));
        let trigger = TriggerHandle::new(CountingTrigger {
            calls: calls.clone(),
        });
        let fell_back = Cell::new(false);

        let res = block_on(finish_celebration(trigger.0.celebrate(), || {
            fell_back.set(true)
        }));
        assert_eq!(res, Ok(()));
        assert_eq!(calls.get(), 1);
        assert!(!fell_back.get());
    }

    #[test]
    fn failure_runs_fallback_without_panicking() {
        let trigger = TriggerHandle::new(BrokenTrigger);
        let fell_back = Cell::new(0);

        let res = block_on(finish_celebration(trigger.0.celebrate(), || {
            fell_back.set(fell_back.get() + 1)
        }));
        assert!(matches!(res, Err(CelebrationError::ModuleLoad(_))));
        assert_eq!(fell_back.get(), 1);
    }

    #[test]
    fn handles_compare_by_identity() {
        let a = TriggerHandle::new(BrokenTrigger);
        let b = a.clone();
        let c = TriggerHandle::new(BrokenTrigger);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            CelebrationError::ModuleLoad("404".into()).to_string(),
            "Confetti import failed: 404"
        );
        assert_eq!(
            CelebrationError::Attribute("boom".into()).to_string(),
            "Could not set the popped attribute: boom"
        );
    }
}
