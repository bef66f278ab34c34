//! Section composer: binds slices of `CvData` to the four page sections.
//!
//! Anchors (`experience`, `skills`, `projects`, `contact`) are part of the
//! page's public contract. Renaming one breaks existing deep links.

use serde::Serialize;

use crate::content::partition::{partition_skills, SkillGroup};
use crate::models::cv::{CvData, Experience, PersonalInfo, Project};

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SectionId {
    Experience,
    Skills,
    Projects,
    Contact,
}

impl SectionId {
    pub const ORDER: [SectionId; 4] = [
        SectionId::Experience,
        SectionId::Skills,
        SectionId::Projects,
        SectionId::Contact,
    ];

    pub fn anchor(self) -> &'static str {
        match self {
            SectionId::Experience => "experience",
            SectionId::Skills => "skills",
            SectionId::Projects => "projects",
            SectionId::Contact => "contact",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            SectionId::Experience => "Experiență",
            SectionId::Skills => "Abilități",
            SectionId::Projects => "Proiecte",
            SectionId::Contact => "Contact",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContactLine<'a> {
    pub label: &'static str,
    pub value: &'a str,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SectionBody<'a> {
    Experience(Vec<&'a Experience>),
    Skills(Vec<SkillGroup<'a>>),
    Projects(Vec<&'a Project>),
    Contact(Vec<ContactLine<'a>>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Section<'a> {
    pub id: SectionId,
    pub title: &'static str,
    pub body: SectionBody<'a>,
}

impl Section<'_> {
    pub fn anchor(&self) -> &'static str {
        self.id.anchor()
    }

    /// Number of item renderers this section fans out to.
    pub fn item_count(&self) -> usize {
        match &self.body {
            SectionBody::Experience(items) => items.len(),
            SectionBody::Skills(groups) => groups.len(),
            SectionBody::Projects(items) => items.len(),
            SectionBody::Contact(lines) => lines.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a> {
    pub personal: &'a PersonalInfo,
    pub sections: Vec<Section<'a>>,
}

pub fn compose_page(cv: &CvData) -> Page<'_> {
    let sections = SectionId::ORDER
        .iter()
        .map(|&id| Section {
            id,
            title: id.title(),
            body: section_body(id, cv),
        })
        .collect();

    Page {
        personal: &cv.personal_info,
        sections,
    }
}

fn section_body(id: SectionId, cv: &CvData) -> SectionBody<'_> {
    match id {
        SectionId::Experience => SectionBody::Experience(cv.experiences.iter().collect()),
        SectionId::Skills => SectionBody::Skills(partition_skills(&cv.skills)),
        SectionId::Projects => SectionBody::Projects(cv.projects.iter().collect()),
        SectionId::Contact => {
            let info = &cv.personal_info;
            SectionBody::Contact(vec![
                ContactLine {
                    label: "Email",
                    value: &info.email,
                },
                ContactLine {
                    label: "Telefon",
                    value: &info.phone,
                },
                ContactLine {
                    label: "Locație",
                    value: &info.location,
                },
            ])
        }
    }
}
