use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct ModalProps {
    #[prop_or_default]
    pub children: Html,
}

/// Renders its children into `document.body`, so dialogs sit above the board.
#[function_component]
pub(crate) fn Modal(props: &ModalProps) -> Html {
    let modal_host = gloo::utils::body();
    create_portal(props.children.clone(), modal_host.into())
}

/// Random deal seed from `Math.random`.
pub(crate) fn js_random_seed() -> u64 {
    use js_sys::Math::random;
    u64::from_be_bytes(std::array::from_fn(|_| (256. * random()) as u8))
}

/// Text shown for the stored best time.
pub(crate) fn format_best(best_secs: Option<u32>) -> String {
    best_secs.map_or_else(|| "—".to_string(), |secs| secs.to_string())
}
