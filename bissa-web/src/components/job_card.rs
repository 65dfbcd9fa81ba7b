use crate::i18n::{t, tr};
use bissa_core::jobs::JobCardView;
use std::collections::BTreeMap;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub job: JobCardView,
}

#[function_component(JobCard)]
pub fn job_card(p: &Props) -> Html {
    let job = &p.job;
    let mut logo_args = BTreeMap::new();
    logo_args.insert("company", job.company.as_str());
    let deadline = if job.deadline.trim().is_empty() {
        t("job.no_deadline")
    } else {
        let mut args = BTreeMap::new();
        args.insert("date", job.deadline.as_str());
        tr("job.deadline", Some(&args))
    };
    let heading_id = format!("job-{}-title", job.id);
    html! {
        <article class="card job-card" aria-labelledby={heading_id.clone()}>
            <header class="job-card-header">
                <img class="company-logo" src={job.logo.clone()} alt={tr("job.logo_alt", Some(&logo_args))} loading="lazy" />
                <div>
                    <h3 id={heading_id}>{ job.title.clone() }</h3>
                    <p class="job-company">{ job.company.clone() }</p>
                </div>
            </header>
            <ul class="job-meta">
                <li class="job-location">{ job.location.clone() }</li>
                <li class="job-type">{ job.job_type.clone() }</li>
                <li class="job-salary">{ job.salary.clone() }</li>
            </ul>
            if !job.description.trim().is_empty() {
                <p class="job-description">{ job.description.clone() }</p>
            }
            if !job.skills.is_empty() {
                <ul class="job-skills">
                    { for job.skills.iter().map(|skill| html! { <li class="badge">{ skill.clone() }</li> }) }
                </ul>
            }
            if let Some(accessibility) = job.accessibility.clone() {
                <p class="job-accessibility">
                    <strong>{ format!("{}: ", t("job.accessibility")) }</strong>
                    { accessibility }
                </p>
            }
            <footer class="job-card-footer">
                <span class="job-deadline">{ deadline }</span>
                <a class="btn btn-primary" href={job.detail_url.clone()}>{ t("job.detail") }</a>
            </footer>
        </article>
    }
}
