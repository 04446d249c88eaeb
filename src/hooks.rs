use crate::celebration::{spawn_celebration, TriggerHandle};
use crate::utils::{counter_state_from_attributes, RawAttributes};
use crate::{CelebrationEdge, CounterAction, CounterState};
use log::info;
use yew::prelude::*;

/// State and callbacks for one counter instance.
#[derive(Clone)]
pub struct UseCounterHandle {
    /// Snapshot of the state for this render.
    pub state: CounterState,
    /// Bound to the "+" button.
    pub on_increment: Callback<MouseEvent>,
    /// Bound to the "-" button.
    pub on_decrement: Callback<MouseEvent>,
}

/// Counter state initialised once from the raw attributes.
///
/// Later changes to `raw` are ignored; the value then only moves through
/// the two callbacks.
#[hook]
pub fn use_counter(raw: RawAttributes) -> UseCounterHandle {
    let state = use_reducer(move || counter_state_from_attributes(&raw));

    let on_increment = {
        let dispatcher = state.dispatcher();
        Callback::from(move |_: MouseEvent| dispatcher.dispatch(CounterAction::Increment))
    };
    let on_decrement = {
        let dispatcher = state.dispatcher();
        Callback::from(move |_: MouseEvent| dispatcher.dispatch(CounterAction::Decrement))
    };

    UseCounterHandle {
        state: *state,
        on_increment,
        on_decrement,
    }
}

/// Run the celebration after any render that moved the value onto the
/// special value.
#[hook]
pub fn use_celebration(value: i64, trigger: TriggerHandle, number: NodeRef) {
    let edge = use_mut_ref(CelebrationEdge::default);

    use_effect_with(value, move |value| {
        if edge.borrow_mut().observe(*value) {
            info!("Counter reached {}, celebrating", value);
            spawn_celebration(&trigger, number);
        }
    });
}
