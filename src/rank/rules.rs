//! Domain rules applied after similarity scoring.
//!
//! Rules come in two kinds. Exclusions drop a candidate outright when the
//! query signals a constraint (e.g. "vegetarian") and the section mentions a
//! conflicting term. Boosts multiply the score when a keyword appears both
//! in the query and in the section title or source document name.

use regex::Regex;

use crate::model::Section;

/// Drops sections that conflict with a constraint stated in the query.
#[derive(Debug, Clone, PartialEq)]
pub struct ExclusionRule {
    /// Query words that activate the rule (any one suffices)
    pub triggers: Vec<String>,
    /// Terms that disqualify a section when they start a word in its text
    pub terms: Vec<String>,
}

impl ExclusionRule {
    /// Create a new exclusion rule.
    pub fn new<T, U>(triggers: T, terms: U) -> Self
    where
        T: IntoIterator,
        T::Item: Into<String>,
        U: IntoIterator,
        U::Item: Into<String>,
    {
        Self {
            triggers: triggers.into_iter().map(Into::into).collect(),
            terms: terms.into_iter().map(Into::into).collect(),
        }
    }

    /// Vegetarian queries exclude meat and fish.
    pub fn vegetarian() -> Self {
        Self::new(
            ["vegetarian", "vegan"],
            [
                "chicken", "beef", "pork", "lamb", "mutton", "veal", "bacon", "ham", "sausage",
                "salami", "pepperoni", "prosciutto", "chorizo", "turkey", "duck", "meat", "steak",
                "fish", "salmon", "tuna", "cod", "shrimp", "prawn", "crab", "lobster", "anchov",
                "gelatin",
            ],
        )
    }

    /// Gluten-free queries exclude gluten-bearing ingredients.
    pub fn gluten_free() -> Self {
        Self::new(
            ["gluten-free", "gluten free"],
            [
                "wheat", "barley", "rye", "bread", "pasta", "spaghetti", "noodle", "couscous",
                "bulgur", "semolina", "spelt", "seitan", "all-purpose flour", "breadcrumb",
                "tortilla", "pita", "crouton", "soy sauce",
            ],
        )
    }
}

/// What a boost keyword is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoostTarget {
    /// The section title
    Title,
    /// The source document identifier (file name)
    DocumentId,
}

/// Multiplies the score when a keyword occurs in both query and target.
#[derive(Debug, Clone, PartialEq)]
pub struct BoostRule {
    /// Whole-word keywords (any one suffices); the boost applies at most once
    pub keywords: Vec<String>,
    /// Field the keywords are matched against
    pub target: BoostTarget,
    /// Score multiplier
    pub factor: f32,
}

impl BoostRule {
    /// Create a new boost rule.
    pub fn new<T>(keywords: T, target: BoostTarget, factor: f32) -> Self
    where
        T: IntoIterator,
        T::Item: Into<String>,
    {
        Self {
            keywords: keywords.into_iter().map(Into::into).collect(),
            target,
            factor,
        }
    }
}

/// Configured exclusion and boost rules.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleSet {
    /// Hard exclusions, applied first
    pub exclusions: Vec<ExclusionRule>,
    /// Soft boosts, applied in order
    pub boosts: Vec<BoostRule>,
}

impl RuleSet {
    /// A rule set with no rules.
    pub fn empty() -> Self {
        Self {
            exclusions: Vec::new(),
            boosts: Vec::new(),
        }
    }

    /// Add an exclusion rule.
    pub fn with_exclusion(mut self, rule: ExclusionRule) -> Self {
        self.exclusions.push(rule);
        self
    }

    /// Add a boost rule.
    pub fn with_boost(mut self, rule: BoostRule) -> Self {
        self.boosts.push(rule);
        self
    }

    /// Check if there are no rules.
    pub fn is_empty(&self) -> bool {
        self.exclusions.is_empty() && self.boosts.is_empty()
    }
}

impl Default for RuleSet {
    /// Dietary exclusions, a ×1.5 title boost for "form" and a ×1.2
    /// document-name boost for "dinner" / "main".
    fn default() -> Self {
        Self::empty()
            .with_exclusion(ExclusionRule::vegetarian())
            .with_exclusion(ExclusionRule::gluten_free())
            .with_boost(BoostRule::new(["form"], BoostTarget::Title, 1.5))
            .with_boost(BoostRule::new(["dinner", "main"], BoostTarget::DocumentId, 1.2))
    }
}

/// A rule set with its term patterns compiled.
#[derive(Debug, Clone)]
pub struct RuleEngine {
    exclusions: Vec<CompiledExclusion>,
    boosts: Vec<CompiledBoost>,
}

#[derive(Debug, Clone)]
struct CompiledExclusion {
    triggers: Regex,
    terms: Regex,
}

#[derive(Debug, Clone)]
struct CompiledBoost {
    keywords: Regex,
    target: BoostTarget,
    factor: f32,
}

impl RuleEngine {
    /// Compile a rule set. Rules with no triggers, terms or keywords are ignored.
    pub fn new(rules: &RuleSet) -> Self {
        let exclusions = rules
            .exclusions
            .iter()
            .filter_map(|r| {
                Some(CompiledExclusion {
                    triggers: standalone_words(&r.triggers)?,
                    terms: word_starts(&r.terms)?,
                })
            })
            .collect();

        let boosts = rules
            .boosts
            .iter()
            .filter_map(|r| {
                Some(CompiledBoost {
                    keywords: whole_words(&r.keywords)?,
                    target: r.target,
                    factor: r.factor,
                })
            })
            .collect();

        Self { exclusions, boosts }
    }

    /// Select the rules the query activates.
    ///
    /// Exclusion triggers must stand alone in the query, so "non-vegetarian"
    /// does not activate the vegetarian rule. Boost keywords must appear as
    /// whole words (plural allowed), so "information" does not activate "form".
    pub fn activate(&self, query: &str) -> ActiveRules<'_> {
        let query = query.to_lowercase();

        let exclusions = self
            .exclusions
            .iter()
            .filter(|r| r.triggers.is_match(&query))
            .map(|r| &r.terms)
            .collect();

        let boosts = self
            .boosts
            .iter()
            .filter(|b| b.keywords.is_match(&query))
            .collect();

        ActiveRules { exclusions, boosts }
    }
}

/// Lowercased, escaped alternation of the non-empty terms.
fn alternation(terms: &[String]) -> Option<String> {
    let escaped: Vec<String> = terms
        .iter()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .map(|t| regex::escape(&t))
        .collect();
    (!escaped.is_empty()).then(|| escaped.join("|"))
}

/// Terms starting a word ("meat" hits "meatballs", "ham" misses "graham").
fn word_starts(terms: &[String]) -> Option<Regex> {
    alternation(terms).map(|alt| Regex::new(&format!(r"\b(?:{})", alt)).unwrap())
}

/// Whole words with an optional plural "s" ("form" hits "forms", misses "platform").
fn whole_words(terms: &[String]) -> Option<Regex> {
    alternation(terms).map(|alt| Regex::new(&format!(r"\b(?:{})s?\b", alt)).unwrap())
}

/// Whole words not joined to a neighbour by a hyphen ("vegan" misses "non-vegan").
fn standalone_words(terms: &[String]) -> Option<Regex> {
    alternation(terms)
        .map(|alt| Regex::new(&format!(r"(?:^|[^\w-])(?:{})s?(?:$|[^\w-])", alt)).unwrap())
}

/// Rules activated by one query.
#[derive(Debug, Clone)]
pub struct ActiveRules<'a> {
    exclusions: Vec<&'a Regex>,
    boosts: Vec<&'a CompiledBoost>,
}

impl ActiveRules<'_> {
    /// Whether any exclusion drops the section.
    pub fn excludes(&self, section: &Section) -> bool {
        if self.exclusions.is_empty() {
            return false;
        }
        let text = section.embedding_text().to_lowercase();
        self.exclusions.iter().any(|p| p.is_match(&text))
    }

    /// Combined multiplier of every boost the section earns.
    pub fn boost_factor(&self, section: &Section) -> f32 {
        let title = section.title.to_lowercase();
        let document = section.document_id.to_lowercase();

        self.boosts
            .iter()
            .filter(|b| {
                let field = match b.target {
                    BoostTarget::Title => &title,
                    BoostTarget::DocumentId => &document,
                };
                b.keywords.is_match(field)
            })
            .map(|b| b.factor)
            .product()
    }

    /// Number of activated exclusion rules.
    pub fn exclusion_count(&self) -> usize {
        self.exclusions.len()
    }

    /// Number of activated boost rules.
    pub fn boost_count(&self) -> usize {
        self.boosts.len()
    }
}
