// src/domain/kind.rs
//! Closed set of node kinds and their child-kind declarations.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeKind {
    School,
    Year,
    Course,
    Term,
    Teacher,
    StudyLine,
    Evaluation,
    GradeSheet,
    InfoPage,
}

use NodeKind::*;

impl NodeKind {
    pub const ALL: [NodeKind; 9] =
        [School, Year, Course, Term, Teacher, StudyLine, Evaluation, GradeSheet, InfoPage];

    /// Kind component of identity keys.
    pub fn id(self) -> &'static str {
        match self {
            School => "school",
            Year => "year",
            Course => "course",
            Term => "term",
            Teacher => "teacher",
            StudyLine => "study_line",
            Evaluation => "evaluation",
            GradeSheet => "grade_sheet",
            InfoPage => "info_page",
        }
    }

    pub fn from_id(id: &str) -> Option<NodeKind> {
        Self::ALL.into_iter().find(|k| k.id() == id)
    }

    /// Structural descent; aggregation follows these.
    pub fn primary(self) -> &'static [NodeKind] {
        match self {
            School => &[Year],
            Year => &[Course],
            Course => &[Term],
            Teacher | StudyLine => &[Course],
            Term | Evaluation | GradeSheet | InfoPage => &[],
        }
    }

    /// Attachments; never descended into by aggregation.
    pub fn secondary(self) -> &'static [NodeKind] {
        match self {
            Year => &[StudyLine, Teacher],
            Course => &[InfoPage],
            Term => &[Evaluation, GradeSheet],
            _ => &[],
        }
    }

    /// Primary kinds first, then secondary.
    pub fn declared(self) -> impl Iterator<Item = NodeKind> {
        self.primary().iter().chain(self.secondary()).copied()
    }

    pub fn declares(self, child: NodeKind) -> bool {
        self.declared().any(|k| k == child)
    }

    pub fn is_leaf(self) -> bool {
        self.declared().next().is_none()
    }

    /// At most one child of this kind per parent.
    pub fn is_singular(self) -> bool {
        matches!(self, Evaluation | GradeSheet | InfoPage)
    }

    /// Kind component for the record listing `child` names under `self`.
    pub fn listing_id(self, child: NodeKind) -> String {
        join!(self.id(), ">", child.id())
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
