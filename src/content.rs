//! Static portfolio content rendered by the page routes.

use strum::{AsRefStr, Display, VariantArray};

pub struct Category {
    pub slug: &'static str,
    pub label: &'static str,
}

pub const CATEGORIES: &[Category] = &[
    Category {
        slug: "learning-analytics",
        label: "Learning Analytics",
    },
    Category {
        slug: "adaptive-systems",
        label: "Adaptive Systems",
    },
    Category {
        slug: "equity",
        label: "Equity & Access",
    },
];

pub struct Project {
    pub title: &'static str,
    pub summary: &'static str,
    pub categories: &'static [&'static str],
    pub years: &'static str,
}

impl Project {
    /// Class list used by the category filter.
    pub fn classes(&self) -> String {
        self.categories.join(" ")
    }
}

pub const PROJECTS: &[Project] = &[
    Project {
        title: "Early Warning Dashboards",
        summary: "Predicting course withdrawal from weekly LMS activity so advisors can reach out before the drop deadline.",
        categories: &["learning-analytics"],
        years: "2021 - present",
    },
    Project {
        title: "Adaptive Practice Tutors",
        summary: "Spaced retrieval schedules that adjust to each student's recall history in introductory statistics.",
        categories: &["adaptive-systems", "learning-analytics"],
        years: "2019 - present",
    },
    Project {
        title: "Bandwidth-Light Courseware",
        summary: "Offline-first course delivery for students on rural and metered connections.",
        categories: &["equity"],
        years: "2022 - 2024",
    },
    Project {
        title: "Fair Peer Assessment",
        summary: "Calibrating peer grades to reduce rater bias across large online cohorts.",
        categories: &["equity", "adaptive-systems"],
        years: "2020 - 2023",
    },
];

#[derive(AsRefStr, Display, VariantArray, Clone, Copy, Debug, PartialEq, Eq)]
#[strum(serialize_all = "lowercase")]
pub enum PublicationKind {
    Journal,
    Conference,
    Chapter,
}

impl PublicationKind {
    pub fn label(self) -> &'static str {
        match self {
            PublicationKind::Journal => "Journal Articles",
            PublicationKind::Conference => "Conference Papers",
            PublicationKind::Chapter => "Book Chapters",
        }
    }
}

pub struct Publication {
    pub title: &'static str,
    pub authors: &'static str,
    pub venue: &'static str,
    pub year: u16,
    pub kind: PublicationKind,
}

pub const PUBLICATIONS: &[Publication] = &[
    Publication {
        title: "Weekly Activity Signals as Predictors of Course Withdrawal",
        authors: "Avery, J., Okafor, N.",
        venue: "Journal of Learning Analytics",
        year: 2024,
        kind: PublicationKind::Journal,
    },
    Publication {
        title: "Recall-Aware Scheduling for Introductory Statistics Practice",
        authors: "Avery, J., Lindqvist, M., Chen, R.",
        venue: "Proceedings of Educational Data Mining",
        year: 2023,
        kind: PublicationKind::Conference,
    },
    Publication {
        title: "Designing Courseware for Intermittent Connectivity",
        authors: "Avery, J.",
        venue: "Handbook of Open Education",
        year: 2023,
        kind: PublicationKind::Chapter,
    },
    Publication {
        title: "Correcting Rater Bias in Massive Peer Assessment",
        authors: "Chen, R., Avery, J.",
        venue: "Computers & Education",
        year: 2022,
        kind: PublicationKind::Journal,
    },
    Publication {
        title: "What Advisors Do With Early Warnings",
        authors: "Okafor, N., Avery, J.",
        venue: "Learning at Scale",
        year: 2021,
        kind: PublicationKind::Conference,
    },
];

pub struct Course {
    pub code: &'static str,
    pub title: &'static str,
    pub level: &'static str,
    pub description: &'static str,
}

pub const COURSES: &[Course] = &[
    Course {
        code: "EDT210",
        title: "Data Literacy for Educators",
        level: "Undergraduate",
        description: "Reading, questioning and presenting classroom data.",
    },
    Course {
        code: "EDT540",
        title: "Learning Analytics Methods",
        level: "Graduate",
        description: "Modeling learner behavior from digital traces.",
    },
    Course {
        code: "EDT610",
        title: "Research Seminar in Educational Technology",
        level: "Doctoral",
        description: "Proposal writing and peer critique for dissertation work.",
    },
];
