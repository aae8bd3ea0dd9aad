//! Naming rules for the rename tasks

use std::path::Path;

use super::{Proposal, RenameRule};

/// Several candidate source names collapsing into one target name.
///
/// More than one candidate in the same directory is ambiguous and is never
/// resolved automatically.
#[derive(Debug, Clone)]
pub struct CandidateRule {
    candidates: Vec<String>,
    target: String,
}

impl CandidateRule {
    pub fn new<I, S>(candidates: I, target: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            candidates: candidates.into_iter().map(Into::into).collect(),
            target: target.into(),
        }
    }
}

impl RenameRule for CandidateRule {
    fn propose(&self, _dir: &Path, file_names: &[String]) -> Proposal {
        let found: Vec<String> = self
            .candidates
            .iter()
            .filter(|c| file_names.contains(c))
            .cloned()
            .collect();

        match found.len() {
            0 => Proposal::none(),
            1 => Proposal::Renames(vec![(found[0].clone(), self.target.clone())]),
            _ => Proposal::Ambiguous(found),
        }
    }
}

/// One exact file name renamed to another
#[derive(Debug, Clone)]
pub struct ExactNameRule {
    from: String,
    to: String,
}

impl ExactNameRule {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

impl RenameRule for ExactNameRule {
    fn propose(&self, _dir: &Path, file_names: &[String]) -> Proposal {
        if file_names.contains(&self.from) {
            Proposal::Renames(vec![(self.from.clone(), self.to.clone())])
        } else {
            Proposal::none()
        }
    }
}

/// Replace a file name suffix (`.htm` -> `.html`, `Structured.json` -> `.json`)
#[derive(Debug, Clone)]
pub struct SuffixRule {
    from: String,
    to: String,
}

impl SuffixRule {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    fn rename(&self, name: &str) -> Option<String> {
        let stem = name.strip_suffix(self.from.as_str())?;
        // A bare suffix would turn into a hidden file name.
        if stem.is_empty() {
            return None;
        }
        Some(format!("{}{}", stem, self.to))
    }
}

impl RenameRule for SuffixRule {
    fn propose(&self, _dir: &Path, file_names: &[String]) -> Proposal {
        Proposal::Renames(
            file_names
                .iter()
                .filter_map(|name| self.rename(name).map(|to| (name.clone(), to)))
                .collect(),
        )
    }
}

/// Study asset names: a `DBS` prefix becomes `Dbs`, and `Leadership`
/// anywhere in the name becomes `Lead`.
#[derive(Debug, Clone, Default)]
pub struct DbsRule;

impl DbsRule {
    fn rename(name: &str) -> String {
        let name = match name.strip_prefix("DBS") {
            Some(rest) => format!("Dbs{}", rest),
            None => name.to_string(),
        };
        name.replace("Leadership", "Lead")
    }
}

impl RenameRule for DbsRule {
    fn propose(&self, _dir: &Path, file_names: &[String]) -> Proposal {
        Proposal::Renames(
            file_names
                .iter()
                .filter_map(|name| {
                    let to = Self::rename(name);
                    (to != *name).then(|| (name.clone(), to))
                })
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn pair(from: &str, to: &str) -> (String, String) {
        (from.to_string(), to.to_string())
    }

    #[test]
    fn test_candidate_single_match() {
        let rule = CandidateRule::new(["commonInterface.json", "commonContent.json"], "text.json");
        let proposal = rule.propose(Path::new("."), &names(&["commonContent.json", "x.json"]));
        assert_eq!(
            proposal,
            Proposal::Renames(vec![pair("commonContent.json", "text.json")])
        );
    }

    #[test]
    fn test_candidate_ambiguous_keeps_candidate_order() {
        let rule = CandidateRule::new(["commonInterface.json", "commonContent.json"], "text.json");
        let proposal = rule.propose(
            Path::new("."),
            &names(&["commonContent.json", "commonInterface.json"]),
        );
        assert_eq!(
            proposal,
            Proposal::Ambiguous(names(&["commonInterface.json", "commonContent.json"]))
        );
    }

    #[test]
    fn test_candidate_no_match() {
        let rule = CandidateRule::new(["commonInterface.json"], "text.json");
        assert_eq!(
            rule.propose(Path::new("."), &names(&["text.json"])),
            Proposal::none()
        );
    }

    #[test]
    fn test_exact_name() {
        let rule = ExactNameRule::new("jVideoStructured.json", "jvideoStructured.json");
        assert_eq!(
            rule.propose(Path::new("."), &names(&["jVideoStructured.json"])),
            Proposal::Renames(vec![pair("jVideoStructured.json", "jvideoStructured.json")])
        );
        assert_eq!(
            rule.propose(Path::new("."), &names(&["jvideoStructured.json"])),
            Proposal::none()
        );
    }

    #[test]
    fn test_suffix_htm_to_html() {
        let rule = SuffixRule::new(".htm", ".html");
        let proposal = rule.propose(
            Path::new("."),
            &names(&["a.htm", "b.html", "c.HTM", "notes.txt"]),
        );
        assert_eq!(proposal, Proposal::Renames(vec![pair("a.htm", "a.html")]));
    }

    #[test]
    fn test_suffix_structured() {
        let rule = SuffixRule::new("Structured.json", ".json");
        let proposal = rule.propose(
            Path::new("."),
            &names(&["dbsStructured.json", "Structured.json", "life.json"]),
        );
        assert_eq!(
            proposal,
            Proposal::Renames(vec![pair("dbsStructured.json", "dbs.json")])
        );
    }

    #[test]
    fn test_dbs_rule() {
        let proposal = DbsRule.propose(
            Path::new("."),
            &names(&[
                "DBS-en.png",
                "Leadership-fr.png",
                "DBSLeadership.png",
                "Dbs-es.png",
                "xDBS.png",
            ]),
        );
        assert_eq!(
            proposal,
            Proposal::Renames(vec![
                pair("DBS-en.png", "Dbs-en.png"),
                pair("Leadership-fr.png", "Lead-fr.png"),
                pair("DBSLeadership.png", "DbsLead.png"),
            ])
        );
    }
}
