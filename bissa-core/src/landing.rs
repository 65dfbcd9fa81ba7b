//! Static landing-page content and the testimonial carousel.

use crate::constants::LANDING_JOB_LIMIT;
use crate::jobs::JobVacancy;
use serde::{Deserialize, Serialize};

const TESTIMONIALS_JSON: &str = include_str!("../data/testimonials.json");

/// Auto-advance period of the testimonial carousel.
pub const TESTIMONIAL_ROTATE_MS: u32 = 6_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Testimonial {
    pub name: String,
    pub role: String,
    pub company: String,
    pub content: String,
    /// Initials shown in the avatar bubble.
    pub avatar: String,
}

/// Bundled testimonials; an unreadable bundle yields none.
#[must_use]
pub fn testimonials() -> Vec<Testimonial> {
    serde_json::from_str(TESTIMONIALS_JSON).unwrap_or_else(|err| {
        log::error!("bundled testimonials are invalid: {err}");
        Vec::new()
    })
}

/// Index into a fixed list that wraps at both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TestimonialCarousel {
    index: usize,
    len: usize,
}

impl TestimonialCarousel {
    #[must_use]
    pub const fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub const fn next(self) -> Self {
        if self.len == 0 {
            return self;
        }
        Self {
            index: (self.index + 1) % self.len,
            len: self.len,
        }
    }

    #[must_use]
    pub const fn prev(self) -> Self {
        if self.len == 0 {
            return self;
        }
        Self {
            index: (self.index + self.len - 1) % self.len,
            len: self.len,
        }
    }

    #[must_use]
    pub fn current<'a, T>(&self, items: &'a [T]) -> Option<&'a T> {
        items.get(self.index)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MethodStep {
    pub step: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

pub const METHODOLOGY: [MethodStep; 4] = [
    MethodStep {
        step: "01",
        title: "Registrasi & Orientasi",
        description: "Proses registrasi yang komprehensif dengan validasi identitas dan assessment kemampuan",
    },
    MethodStep {
        step: "02",
        title: "Pengembangan Profil",
        description: "Pengembangan profil profesional dengan bantuan konsultan karier bersertifikat",
    },
    MethodStep {
        step: "03",
        title: "Pencocokan Cerdas",
        description: "Sistem yang mencocokkan kandidat dengan peluang berdasarkan kompatibilitas holistik",
    },
    MethodStep {
        step: "04",
        title: "Aplikasi & Tindak Lanjut",
        description: "Proses aplikasi terintegrasi dengan pelacakan real-time dan dukungan berkelanjutan",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Service {
    pub category: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

pub const SERVICES: [Service; 4] = [
    Service {
        category: "Individu",
        title: "Penyandang Disabilitas",
        description: "Solusi komprehensif untuk penyandang disabilitas dalam mengembangkan karier profesional yang berkelanjutan",
    },
    Service {
        category: "Mitra Perusahaan",
        title: "Perusahaan",
        description: "Program kemitraan strategis untuk perusahaan dalam membangun tenaga kerja yang beragam dan inklusif",
    },
    Service {
        category: "Pemerintah",
        title: "Hubungan Pemerintah",
        description: "Kolaborasi dengan Disnaker dalam implementasi kebijakan ketenagakerjaan yang progresif",
    },
    Service {
        category: "Regulasi",
        title: "Komnas Disabilitas",
        description: "Kerja sama dengan Komnas Disabilitas untuk memastikan perlindungan hak dan standar industri",
    },
];

/// Hero statistics: (value, caption).
pub const HERO_STATS: [(&str, &str); 3] = [
    ("10K+", "Peluang Karier"),
    ("500+", "Mitra Perusahaan"),
    ("95%", "Tingkat Kepuasan"),
];

/// The curated jobs strip shows the first few vacancies in API order.
#[must_use]
pub fn curated_jobs(jobs: &[JobVacancy]) -> &[JobVacancy] {
    &jobs[..jobs.len().min(LANDING_JOB_LIMIT)]
}
