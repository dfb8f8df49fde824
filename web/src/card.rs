use memory_match_core::{Card, CardState, Position};
use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct CardProps {
    pub card: Card,
    #[prop_or_default]
    pub locked: bool,
    pub callback: Callback<Position>,
}

/// Keys that activate a focused card.
pub(crate) fn is_activation_key(key: &str) -> bool {
    matches!(key, "Enter" | " ")
}

const fn state_name(state: CardState) -> &'static str {
    match state {
        CardState::Hidden => "hidden",
        CardState::Flipped => "flipped",
        CardState::Matched => "matched",
    }
}

#[function_component(CardView)]
pub(crate) fn card_component(props: &CardProps) -> Html {
    let CardProps {
        card,
        locked,
        callback,
    } = props.clone();
    let position = card.position();

    let mut class = classes!("card");
    if locked {
        class.push("locked");
    }

    let onclick = {
        let callback = callback.clone();
        Callback::from(move |_: MouseEvent| {
            log::trace!("card {} clicked", position);
            callback.emit(position);
        })
    };

    // the default action would also fire a click on the button
    let onkeydown = Callback::from(move |e: KeyboardEvent| {
        if is_activation_key(&e.key()) {
            e.prevent_default();
            log::trace!("card {} activated by key", position);
            callback.emit(position);
        }
    });

    html! {
        <button
            {class}
            data-state={state_name(card.state())}
            aria-label={card.label()}
            {onclick}
            {onkeydown}
        >
            <div class="card-inner">
                <div class="card-front">{"❓"}</div>
                <div class="card-back" aria-hidden="true">{card.symbol().glyph()}</div>
            </div>
        </button>
    }
}
