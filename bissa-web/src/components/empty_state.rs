use crate::i18n::t;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub title: AttrValue,
    pub message: AttrValue,
    /// Marks the state as a failure for assistive technology.
    #[prop_or_default]
    pub error: bool,
    pub on_retry: Callback<()>,
}

/// Empty or failed listing with a reload action.
#[function_component(EmptyState)]
pub fn empty_state(p: &Props) -> Html {
    let retry = {
        let cb = p.on_retry.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {
        <div class={classes!("empty-state", p.error.then_some("empty-state-error"))}
            role={if p.error { "alert" } else { "status" }}>
            <h3>{ p.title.clone() }</h3>
            <p>{ p.message.clone() }</p>
            <button type="button" class="btn btn-primary" onclick={retry}>{ t("state.retry") }</button>
        </div>
    }
}
