use crate::i18n::t;
use yew::prelude::*;

#[function_component(Footer)]
pub fn footer() -> Html {
    html! {
        <footer role="contentinfo" class="site-footer">
            <p class="footer-brand">{ t("app.name") }</p>
            <p>{ t("app.tagline") }</p>
            <p>{ t("footer.contact") }</p>
            <p class="footer-copyright">{ t("footer.copyright") }</p>
        </footer>
    }
}
