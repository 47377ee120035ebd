//! Role catalog — static reference data keyed by normalised role name.
//!
//! Built once at startup and shared read-only. Two lookup styles exist on purpose:
//! headline rewriting resolves roles fuzzily by first token, summary rewriting only
//! accepts an exact key. Unknown roles are never an error; callers interpolate the
//! raw role into generic text instead.

use std::collections::HashMap;

/// Headlines that are considered too generic by themselves.
pub const GENERIC_HEADLINES: &[&str] = &["student", "graduate", "engineer", "software engineer"];

/// Text markers that usually indicate a student or entry-level profile.
pub const ENTRY_LEVEL_MARKERS: &[&str] = &[
    "student",
    "graduate",
    "looking for",
    "first opportunity",
    "motivated",
];

/// Everything the rule-based rewriters know about one target role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleProfile {
    pub key: &'static str,
    pub tagline: &'static str,
    pub keywords: &'static [&'static str],
    pub experienced_template: &'static str,
    pub entry_level_template: &'static str,
}

/// True when the trimmed, lowercased headline is one of [`GENERIC_HEADLINES`].
pub fn is_generic_headline(headline: &str) -> bool {
    let lower = headline.trim().to_lowercase();
    GENERIC_HEADLINES.contains(&lower.as_str())
}

/// First whitespace-delimited token of the lowercased role, or `""`.
pub fn first_token(role: &str) -> String {
    role.to_lowercase()
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_string()
}

/// Immutable role table plus the decision engine's role-family keywords.
#[derive(Debug, Clone)]
pub struct RoleCatalog {
    profiles: Vec<RoleProfile>,
    index: HashMap<&'static str, usize>,
    families: HashMap<&'static str, &'static [&'static str]>,
}

impl RoleCatalog {
    /// The compiled-in catalog. Profile order is significant for [`RoleCatalog::fuzzy`].
    pub fn builtin() -> Self {
        Self::new(builtin_profiles(), BUILTIN_FAMILIES)
    }

    pub fn new(
        profiles: Vec<RoleProfile>,
        families: &[(&'static str, &'static [&'static str])],
    ) -> Self {
        let index = profiles
            .iter()
            .enumerate()
            .map(|(i, p)| (p.key, i))
            .collect();
        Self {
            profiles,
            index,
            families: families.iter().copied().collect(),
        }
    }

    pub fn profiles(&self) -> &[RoleProfile] {
        &self.profiles
    }

    /// Case-insensitive exact match on the full role key. Surrounding whitespace is
    /// trimmed before the lookup.
    pub fn exact(&self, role: &str) -> Option<&RoleProfile> {
        let key = role.trim().to_lowercase();
        self.index.get(key.as_str()).map(|&i| &self.profiles[i])
    }

    /// Exact match first, then the first profile (in table order) whose key starts with
    /// the role's first token or contains it. A blank role matches nothing, rather than
    /// the first key (every key starts with the empty string).
    pub fn fuzzy(&self, role: &str) -> Option<&RoleProfile> {
        if let Some(profile) = self.exact(role) {
            return Some(profile);
        }

        let first = first_token(role);
        if first.is_empty() {
            return None;
        }

        self.profiles
            .iter()
            .find(|p| p.key.starts_with(first.as_str()) || p.key.contains(first.as_str()))
    }

    /// Role-family keywords used by the decision engine, keyed by the role's first token.
    /// Unknown families yield an empty slice.
    pub fn family_keywords(&self, role: &str) -> &'static [&'static str] {
        let family = first_token(role);
        self.families.get(family.as_str()).copied().unwrap_or_default()
    }
}

impl Default for RoleCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Compiled-in data
// ────────────────────────────────────────────────────────────────────────────

const BUILTIN_FAMILIES: &[(&str, &[&str])] = &[
    ("backend", &["backend", "api", "server", "python", "java"]),
    ("data", &["data", "analytics", "sql", "ml"]),
    ("qa", &["qa", "testing", "automation"]),
];

fn builtin_profiles() -> Vec<RoleProfile> {
    vec![
        RoleProfile {
            key: "backend developer",
            tagline: "APIs & Server-Side Systems",
            keywords: &["api", "backend", "server", "python", "java"],
            experienced_template: "Backend Developer with hands-on experience building server-side logic, APIs, \
                and data-driven systems, focusing on reliability and scalability.",
            entry_level_template: "Computer Science student with a strong foundation in backend development, \
                experienced through academic and personal projects involving APIs, Python, \
                and server-side systems.",
        },
        RoleProfile {
            key: "frontend developer",
            tagline: "React & Modern Web",
            keywords: &["react", "javascript", "frontend", "ui"],
            experienced_template: "Frontend Developer experienced in building user interfaces using modern \
                JavaScript frameworks, with a strong focus on usability and performance.",
            entry_level_template: "Computer Science student with a focus on frontend development, experienced \
                in building user interfaces using React and modern JavaScript through \
                academic and personal projects.",
        },
        RoleProfile {
            key: "data analyst",
            tagline: "Data & Analytics",
            keywords: &["data", "sql", "analytics", "statistics"],
            experienced_template: "Data Analyst with experience working with data, statistics, and transforming \
                raw data into actionable insights.",
            entry_level_template: "Student with a strong analytical background, experienced in data analysis, \
                SQL, and statistics through academic coursework and projects.",
        },
        RoleProfile {
            key: "data scientist",
            tagline: "ML & Data-Driven Insights",
            keywords: &["data", "ml", "python", "statistics", "modeling"],
            experienced_template: "Data Scientist with experience in machine learning, statistics, and turning \
                data into models and business impact.",
            entry_level_template: "Student with a strong foundation in data science and ML, experienced in \
                Python, statistics, and modeling through coursework and projects.",
        },
        RoleProfile {
            key: "qa engineer",
            tagline: "Testing & Quality Assurance",
            keywords: &["qa", "testing", "automation"],
            experienced_template: "QA Engineer with experience in software testing, quality assurance processes, \
                and ensuring system reliability.",
            entry_level_template: "Computer Science student with a focus on software quality and testing, \
                experienced in QA methodologies and testing tools through academic projects.",
        },
        RoleProfile {
            key: "devops engineer",
            tagline: "CI/CD & Cloud",
            keywords: &["ci/cd", "docker", "cloud", "automation"],
            experienced_template: "DevOps Engineer with experience in CI/CD pipelines, cloud infrastructure, \
                and automation.",
            entry_level_template: "Computer Science student with hands-on experience in DevOps concepts such as \
                CI/CD, automation, and cloud fundamentals through academic and personal projects.",
        },
        RoleProfile {
            key: "full stack developer",
            tagline: "End-to-End Development",
            keywords: &["frontend", "backend", "react", "api"],
            experienced_template: "Full Stack Developer experienced in both frontend and backend, building \
                end-to-end applications with modern frameworks.",
            entry_level_template: "Computer Science student with full stack experience through projects in \
                frontend and backend technologies.",
        },
        RoleProfile {
            key: "software engineer",
            tagline: "Software Development",
            keywords: &["software", "development", "code", "systems"],
            experienced_template: "Software Engineer with experience designing and building reliable systems \
                and clean, maintainable code.",
            entry_level_template: "Computer Science student building practical experience in software development \
                through coursework and personal projects.",
        },
        RoleProfile {
            key: "mobile developer",
            tagline: "iOS & Android",
            keywords: &["mobile", "ios", "android", "react native", "swift", "kotlin"],
            experienced_template: "Mobile Developer experienced in building native or cross-platform apps \
                for iOS and Android.",
            entry_level_template: "Student with experience in mobile development through projects in iOS, \
                Android, or cross-platform frameworks.",
        },
        RoleProfile {
            key: "ml engineer",
            tagline: "Machine Learning & Production ML",
            keywords: &["ml", "machine learning", "python", "model", "production"],
            experienced_template: "ML Engineer with experience taking machine learning models from research \
                to production, including pipelines and monitoring.",
            entry_level_template: "Student with a focus on machine learning and ML systems, experienced through \
                coursework and projects in Python and ML frameworks.",
        },
        RoleProfile {
            key: "cloud engineer",
            tagline: "Cloud & Infrastructure",
            keywords: &["cloud", "aws", "azure", "gcp", "infrastructure"],
            experienced_template: "Cloud Engineer with experience in AWS, Azure, or GCP, infrastructure as code, \
                and scalable architectures.",
            entry_level_template: "Student with hands-on experience in cloud and infrastructure through \
                courses and personal projects (AWS, Azure, or GCP).",
        },
        RoleProfile {
            key: "security engineer",
            tagline: "Application & Cloud Security",
            keywords: &["security", "application", "cloud", "compliance"],
            experienced_template: "Security Engineer focused on application and cloud security, compliance, \
                and secure development practices.",
            entry_level_template: "Student with interest in security, experienced through coursework and \
                projects in application or cloud security.",
        },
        RoleProfile {
            key: "product manager",
            tagline: "Product & Roadmap",
            keywords: &["product", "roadmap", "stakeholders", "agile"],
            experienced_template: "Product Manager with experience defining roadmaps, working with stakeholders, \
                and driving delivery in agile environments.",
            entry_level_template: "Student with interest in product management, experienced through projects \
                in requirements, roadmap, and agile practices.",
        },
        RoleProfile {
            key: "technical lead",
            tagline: "Architecture & Team Leadership",
            keywords: &["architecture", "lead", "team", "technical"],
            experienced_template: "Technical Lead with experience in architecture decisions, mentoring, \
                and leading engineering teams.",
            entry_level_template: "Student with leadership experience in technical projects and team collaboration.",
        },
    ]
}
