//! Static checks that every placeholder resolves to exactly one declaration.

use std::{collections::HashSet, fmt::Display};

use crate::{
    document::{CommandDocument, Declaration},
    logic::ParamError,
    template::{ParseError, PlaceholderKind, Template},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Warning,
    Error,
}

impl Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Warning => f.write_str("warning"),
            Severity::Error => f.write_str("error"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationKind {
    Argument,
    Logic,
}

impl Display for DeclarationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeclarationKind::Argument => f.write_str("argument"),
            DeclarationKind::Logic => f.write_str("custom logic"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Issue {
    #[error("alias is empty")]
    EmptyAlias,
    #[error("base command is empty")]
    EmptyBaseCommand,
    #[error("template: {0}")]
    TemplateSyntax(ParseError),
    #[error("template references undeclared argument `{0}`")]
    DanglingArgumentReference(String),
    #[error("template references undeclared custom logic `{0}`")]
    DanglingLogicReference(String),
    #[error("{kind} `{name}` is never used by the template")]
    UnusedDeclaration { name: String, kind: DeclarationKind },
    #[error("choice argument `{0}` has no choices")]
    EmptyChoices(String),
    #[error("custom logic `{key}`: {source}")]
    InvalidLogicParams { key: String, source: ParamError },
    #[error("info command has no aliases")]
    NoAliases,
    #[error("alias #{0} is blank")]
    BlankAlias(usize),
    #[error("alias `{0}` is listed more than once")]
    DuplicateAlias(String),
}

impl Issue {
    pub fn severity(&self) -> Severity {
        match self {
            Issue::UnusedDeclaration { .. } | Issue::DuplicateAlias(_) => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

/// Findings from one validation pass. Advisory only; export never depends on it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    issues: Vec<Issue>,
}

impl Report {
    pub(crate) fn push(&mut self, issue: Issue) {
        self.issues.push(issue);
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn errors(&self) -> impl Iterator<Item = &Issue> {
        self.issues
            .iter()
            .filter(|i| i.severity() == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Issue> {
        self.issues
            .iter()
            .filter(|i| i.severity() == Severity::Warning)
    }

    /// No fatal findings: every placeholder resolves.
    pub fn is_valid(&self) -> bool {
        self.errors().next().is_none()
    }

    /// Valid and nothing declared without being used.
    pub fn is_complete(&self) -> bool {
        self.issues.is_empty()
    }
}

pub fn validate(doc: &CommandDocument) -> Report {
    let mut report = Report::default();

    if doc.alias.trim().is_empty() {
        report.push(Issue::EmptyAlias);
    }
    if doc.base_command.trim().is_empty() {
        report.push(Issue::EmptyBaseCommand);
    }

    for (name, decl) in doc.declarations() {
        match decl {
            Declaration::Argument(kind) => {
                if kind.choices().is_some_and(|c| c.is_empty()) {
                    report.push(Issue::EmptyChoices(name.to_string()));
                }
            }
            Declaration::Logic(logic) => {
                if let Err(source) = logic.validate() {
                    report.push(Issue::InvalidLogicParams {
                        key: name.to_string(),
                        source,
                    });
                }
            }
        }
    }

    let template = match Template::parse(&doc.template) {
        Ok(t) => t,
        Err(e) => {
            // Usage is unknown without a parse, so unused warnings are skipped.
            report.push(Issue::TemplateSyntax(e));
            return report;
        }
    };

    let mut used = HashSet::new();
    let mut reported = HashSet::new();

    for placeholder in template.placeholders() {
        match &placeholder.kind {
            PlaceholderKind::Reserved(_) => {}
            PlaceholderKind::Argument(name) => match doc.declaration(name) {
                Some(Declaration::Argument(_)) => {
                    used.insert(name.as_str());
                }
                _ => {
                    if reported.insert(&placeholder.kind) {
                        report.push(Issue::DanglingArgumentReference(name.clone()));
                    }
                }
            },
            PlaceholderKind::Custom(key) => match doc.declaration(key) {
                Some(Declaration::Logic(_)) => {
                    used.insert(key.as_str());
                }
                _ => {
                    if reported.insert(&placeholder.kind) {
                        report.push(Issue::DanglingLogicReference(key.clone()));
                    }
                }
            },
        }
    }

    for (name, decl) in doc.declarations() {
        if !used.contains(name) {
            let kind = match decl {
                Declaration::Argument(_) => DeclarationKind::Argument,
                Declaration::Logic(_) => DeclarationKind::Logic,
            };
            report.push(Issue::UnusedDeclaration {
                name: name.to_string(),
                kind,
            });
        }
    }

    tracing::debug!(
        errors = report.errors().count(),
        warnings = report.warnings().count(),
        "validated command document"
    );
    report
}
