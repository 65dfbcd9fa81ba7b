use yew_router::prelude::*;

#[derive(Clone, Debug, Routable, PartialEq, Eq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/cari-kerja")]
    CariKerja,
    #[at("/404")]
    #[not_found]
    NotFound,
}

impl Route {
    /// Translation key of the document title.
    #[must_use]
    pub const fn title_key(&self) -> &'static str {
        match self {
            Self::Home => "app.name",
            Self::CariKerja => "search.title",
            Self::NotFound => "not_found.title",
        }
    }

    /// Name reported through the test bridge.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::CariKerja => "cari-kerja",
            Self::NotFound => "not-found",
        }
    }
}
