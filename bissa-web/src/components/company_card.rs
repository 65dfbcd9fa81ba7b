use crate::i18n::tr;
use bissa_core::companies::Company;
use std::collections::BTreeMap;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub company: Company,
    pub asset_base: AttrValue,
}

#[function_component(CompanyCard)]
pub fn company_card(p: &Props) -> Html {
    let c = &p.company;
    let mut logo_args = BTreeMap::new();
    logo_args.insert("company", c.name.as_str());
    let since = c.created_at.as_deref().map(|date| {
        let mut args = BTreeMap::new();
        args.insert("date", date);
        tr("landing.since", Some(&args))
    });
    html! {
        <article class="card company-card">
            <img class="company-logo" src={c.logo_src(&p.asset_base)} alt={tr("job.logo_alt", Some(&logo_args))} loading="lazy" />
            <h3>{ c.name.clone() }</h3>
            if !c.industry.trim().is_empty() {
                <p class="company-industry">{ c.industry.clone() }</p>
            }
            <span class={classes!("status-badge", format!("status-{}", c.status.key()))}>
                { c.status.label() }
            </span>
            <dl class="company-contact">
                <dt class="sr-only">{ "Email" }</dt>
                <dd>{ c.email.clone() }</dd>
                <dt class="sr-only">{ "Telepon" }</dt>
                <dd>{ c.phone.clone() }</dd>
                <dt class="sr-only">{ "Alamat" }</dt>
                <dd>{ c.address.clone() }</dd>
            </dl>
            if let Some(since) = since {
                <p class="company-since">{ since }</p>
            }
        </article>
    }
}
