use crate::router::Route;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub to: Route,
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub current: bool,
    #[prop_or_default]
    pub children: Html,
}

/// An `<a>` that navigates in-app when a router is present and degrades to a
/// plain link otherwise.
#[function_component(NavLink)]
pub fn nav_link(p: &Props) -> Html {
    let navigator = use_navigator();
    let onclick = {
        let to = p.to.clone();
        Callback::from(move |e: MouseEvent| {
            if e.ctrl_key() || e.meta_key() || e.shift_key() {
                return;
            }
            if let Some(nav) = navigator.as_ref() {
                e.prevent_default();
                nav.push(&to);
            }
        })
    };
    html! {
        <a
            href={p.to.to_path()}
            class={p.class.clone()}
            aria-current={p.current.then_some("page")}
            onclick={onclick}
        >
            { p.children.clone() }
        </a>
    }
}
