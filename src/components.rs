//! Yew view components for the counter widget.
//!
//! `CounterApp` owns the state; the smaller components only render props.

use crate::celebration::{ConfettiTrigger, TriggerHandle};
use crate::config::CONFETTI_ID;
use crate::hooks::{use_celebration, use_counter};
use crate::utils::RawAttributes;
use crate::Classification;
use yew::prelude::*;

/// The large number, colored by its classification.
#[derive(Properties, PartialEq)]
pub struct CounterNumberProps {
    pub value: i64,
    pub classification: Classification,
    pub number_ref: NodeRef,
}

#[function_component(CounterNumber)]
pub fn counter_number(props: &CounterNumberProps) -> Html {
    let color = props.classification.css_class();
    html! {
        <div
            ref={props.number_ref.clone()}
            class={classes!("number", (!color.is_empty()).then_some(color))}
        >
            { props.value }
        </div>
    }
}

/// Decrease and increase buttons, each disabled at its bound.
#[derive(Properties, PartialEq)]
pub struct CounterControlsProps {
    pub at_min: bool,
    pub at_max: bool,
    pub on_decrement: Callback<MouseEvent>,
    pub on_increment: Callback<MouseEvent>,
}

#[function_component(CounterControls)]
pub fn counter_controls(props: &CounterControlsProps) -> Html {
    html! {
        <div>
            <button
                aria-label="decrease"
                onclick={props.on_decrement.clone()}
                disabled={props.at_min}
            >
                { "-" }
            </button>
            <button
                aria-label="increase"
                onclick={props.on_increment.clone()}
                disabled={props.at_max}
            >
                { "+" }
            </button>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct BoundsLabelProps {
    pub min: i64,
    pub max: i64,
}

#[function_component(BoundsLabel)]
pub fn bounds_label(props: &BoundsLabelProps) -> Html {
    html! {
        <div class="bounds">{ format!("min: {}  max: {}", props.min, props.max) }</div>
    }
}

/// Configuration for a counter instance. Numeric fields arrive as text.
#[derive(Properties, PartialEq, Default)]
pub struct CounterAppProps {
    #[prop_or_default]
    pub value: Option<AttrValue>,
    #[prop_or_default]
    pub min: Option<AttrValue>,
    #[prop_or_default]
    pub max: Option<AttrValue>,
    /// JSON object with any of `value`, `min`, `max`.
    #[prop_or_default]
    pub config: Option<AttrValue>,
    /// Replaces the confetti effect, mostly for tests and embedding.
    #[prop_or_default]
    pub trigger: Option<TriggerHandle>,
}

impl CounterAppProps {
    pub fn raw_attributes(&self) -> RawAttributes {
        let text = |v: &Option<AttrValue>| v.as_ref().map(|s| s.to_string());
        RawAttributes {
            config: text(&self.config),
            value: text(&self.value),
            min: text(&self.min),
            max: text(&self.max),
        }
    }
}

impl From<RawAttributes> for CounterAppProps {
    fn from(raw: RawAttributes) -> Self {
        Self {
            value: raw.value.map(AttrValue::from),
            min: raw.min.map(AttrValue::from),
            max: raw.max.map(AttrValue::from),
            config: raw.config.map(AttrValue::from),
            trigger: None,
        }
    }
}

/// Counter widget wrapped in the confetti container.
#[function_component(CounterApp)]
pub fn counter_app(props: &CounterAppProps) -> Html {
    let container = use_node_ref();
    let number = use_node_ref();

    let counter = use_counter(props.raw_attributes());
    let confetti = {
        let container = container.clone();
        use_memo((), move |_| TriggerHandle::new(ConfettiTrigger::new(container)))
    };
    let trigger = props
        .trigger
        .clone()
        .unwrap_or_else(|| (*confetti).clone());

    let state = counter.state;
    use_celebration(state.value, trigger, number.clone());

    html! {
        <confetti-container id={CONFETTI_ID} ref={container}>
            <CounterNumber
                value={state.value}
                classification={state.classification()}
                number_ref={number}
            />
            <CounterControls
                at_min={state.at_min()}
                at_max={state.at_max()}
                on_decrement={counter.on_decrement}
                on_increment={counter.on_increment}
            />
            <BoundsLabel min={state.min} max={state.max} />
        </confetti-container>
    }
}
