//! Event model: hackathons and vacancies with their closed categorical fields.

use serde::{Deserialize, Serialize};

/// Kind of event being advertised.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum EventType {
    #[serde(rename = "hackathon")]
    Hackathon,
    #[serde(rename = "vacancy")]
    Vacancy,
}

impl EventType {
    pub const ALL: [EventType; 2] = [EventType::Hackathon, EventType::Vacancy];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Hackathon => "hackathon",
            EventType::Vacancy => "vacancy",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "hackathon" => Some(EventType::Hackathon),
            "vacancy" => Some(EventType::Vacancy),
            _ => None,
        }
    }
}

/// Professional direction an event targets.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Direction {
    #[serde(rename = "backend")]
    Backend,
    #[serde(rename = "frontend")]
    Frontend,
    #[serde(rename = "ml")]
    Ml,
    #[serde(rename = "ux/ui")]
    UxUi,
    #[serde(rename = "business analytics")]
    BusinessAnalytics,
    #[serde(rename = "gamedev")]
    Gamedev,
}

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::Backend,
        Direction::Frontend,
        Direction::Ml,
        Direction::UxUi,
        Direction::BusinessAnalytics,
        Direction::Gamedev,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Backend => "backend",
            Direction::Frontend => "frontend",
            Direction::Ml => "ml",
            Direction::UxUi => "ux/ui",
            Direction::BusinessAnalytics => "business analytics",
            Direction::Gamedev => "gamedev",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "backend" => Some(Direction::Backend),
            "frontend" => Some(Direction::Frontend),
            "ml" => Some(Direction::Ml),
            "ux/ui" => Some(Direction::UxUi),
            "business analytics" => Some(Direction::BusinessAnalytics),
            "gamedev" => Some(Direction::Gamedev),
            _ => None,
        }
    }
}

/// Technology a participant or candidate is expected to know.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Skill {
    #[serde(rename = "python")]
    Python,
    #[serde(rename = "java")]
    Java,
    #[serde(rename = "c++")]
    CPlusPlus,
    #[serde(rename = "c")]
    C,
    #[serde(rename = "c#")]
    CSharp,
    #[serde(rename = "go")]
    Go,
    #[serde(rename = "html/css")]
    HtmlCss,
    #[serde(rename = "flutter")]
    Flutter,
    #[serde(rename = "swift")]
    Swift,
    #[serde(rename = "kotlin")]
    Kotlin,
}

impl Skill {
    pub const ALL: [Skill; 10] = [
        Skill::Python,
        Skill::Java,
        Skill::CPlusPlus,
        Skill::C,
        Skill::CSharp,
        Skill::Go,
        Skill::HtmlCss,
        Skill::Flutter,
        Skill::Swift,
        Skill::Kotlin,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Skill::Python => "python",
            Skill::Java => "java",
            Skill::CPlusPlus => "c++",
            Skill::C => "c",
            Skill::CSharp => "c#",
            Skill::Go => "go",
            Skill::HtmlCss => "html/css",
            Skill::Flutter => "flutter",
            Skill::Swift => "swift",
            Skill::Kotlin => "kotlin",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "python" => Some(Skill::Python),
            "java" => Some(Skill::Java),
            "c++" => Some(Skill::CPlusPlus),
            "c" => Some(Skill::C),
            "c#" => Some(Skill::CSharp),
            "go" => Some(Skill::Go),
            "html/css" => Some(Skill::HtmlCss),
            "flutter" => Some(Skill::Flutter),
            "swift" => Some(Skill::Swift),
            "kotlin" => Some(Skill::Kotlin),
            _ => None,
        }
    }
}

/// Seniority expected from applicants.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ExperienceLevel {
    #[serde(rename = "junior")]
    Junior,
    #[serde(rename = "middle")]
    Middle,
    #[serde(rename = "senior")]
    Senior,
}

impl ExperienceLevel {
    pub const ALL: [ExperienceLevel; 3] = [
        ExperienceLevel::Junior,
        ExperienceLevel::Middle,
        ExperienceLevel::Senior,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExperienceLevel::Junior => "junior",
            ExperienceLevel::Middle => "middle",
            ExperienceLevel::Senior => "senior",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "junior" => Some(ExperienceLevel::Junior),
            "middle" => Some(ExperienceLevel::Middle),
            "senior" => Some(ExperienceLevel::Senior),
            _ => None,
        }
    }
}

/// A hackathon or vacancy published by the owner identified by `email`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Event {
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub direction: Direction,
    pub skills: Vec<Skill>,
    pub experience_lvl: ExperienceLevel,
    pub email: String,
}
