//! Portfolio content model.
//!
//! The page shows whatever is in a [`Portfolio`].  A small built-in sample
//! is used unless `--content <file.toml>` points at a real one.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{read_toml, FolioResult};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Portfolio {
    pub name: String,
    pub tagline: String,
    pub bio: Vec<String>,
    pub links: Vec<Link>,
    pub skills: Vec<SkillGroup>,
    pub experience: Vec<Role>,
    pub education: Vec<Degree>,
    pub certifications: Vec<String>,
    pub publications: Vec<Publication>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Link {
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillGroup {
    pub name: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Role {
    pub title: String,
    pub company: String,
    pub period: String,
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Degree {
    pub degree: String,
    pub school: String,
    pub period: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Publication {
    pub title: String,
    pub venue: String,
    pub year: String,
}

impl Portfolio {
    pub fn load_from_path(path: impl AsRef<Path>) -> FolioResult<Self> {
        read_toml(path.as_ref())
    }
}

impl Portfolio {
    /// Built-in content shown when no `--content` file is given.
    pub fn sample() -> Self {
        let s = |v: &str| v.to_string();
        let strings = |vs: &[&str]| vs.iter().map(|v| v.to_string()).collect::<Vec<_>>();
        Self {
            name: s("Jordan Avery"),
            tagline: s("Software engineer · distributed systems · developer tooling"),
            bio: strings(&[
                "I build reliable backend systems and the tools that keep them observable.",
                "Most of my recent work is in Rust: storage engines, network services and CLIs.",
            ]),
            links: vec![
                Link {
                    label: s("GitHub"),
                    url: s("https://github.com/example"),
                },
                Link {
                    label: s("Email"),
                    url: s("mailto:jordan@example.com"),
                },
            ],
            skills: vec![
                SkillGroup {
                    name: s("Languages"),
                    items: strings(&["Rust", "Go", "TypeScript", "Python", "SQL"]),
                },
                SkillGroup {
                    name: s("Systems"),
                    items: strings(&["PostgreSQL", "Kafka", "Redis", "gRPC", "Linux"]),
                },
                SkillGroup {
                    name: s("Practices"),
                    items: strings(&["Observability", "Load testing", "Incident response"]),
                },
            ],
            experience: vec![
                Role {
                    title: s("Senior Software Engineer"),
                    company: s("Northwind Data"),
                    period: s("2021 – present"),
                    highlights: strings(&[
                        "Led the rewrite of the ingestion pipeline, cutting p99 latency by 60%.",
                        "Designed the tracing rollout across 40 services.",
                        "Mentored four engineers through their first on-call rotations.",
                    ]),
                },
                Role {
                    title: s("Software Engineer"),
                    company: s("Contoso Cloud"),
                    period: s("2017 – 2021"),
                    highlights: strings(&[
                        "Built the internal deploy CLI used by every product team.",
                        "Owned the metadata store behind object storage.",
                    ]),
                },
            ],
            education: vec![Degree {
                degree: s("B.Sc. Computer Science"),
                school: s("State University"),
                period: s("2013 – 2017"),
            }],
            certifications: strings(&[
                "Certified Kubernetes Administrator",
                "AWS Solutions Architect – Associate",
            ]),
            publications: vec![
                Publication {
                    title: s("Backpressure in practice: lessons from a streaming ingest"),
                    venue: s("Systems Engineering Blog"),
                    year: s("2023"),
                },
                Publication {
                    title: s("Cheap consistency checks for log-structured stores"),
                    venue: s("Workshop on Storage Systems"),
                    year: s("2020"),
                },
            ],
        }
    }
}
