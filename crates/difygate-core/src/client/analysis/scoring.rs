//! Keyword scoring of recorded answers.
//!
//! Each force has a summary verdict and a few detail verdicts. A verdict
//! picks the text of the first rule whose keyword appears in the joined
//! answer labels of that category (case-sensitive), or its fallback. The
//! keywords match the labels of the built-in tree; a custom tree that uses
//! other wording gets the fallback texts.

use difygate_types::analysis::{
    AnalysisReport, CategoryAnalysis, Force, ForceTree, RecordedAnswer,
};

struct Verdict {
    rules: &'static [(&'static str, &'static str)],
    fallback: &'static str,
}

impl Verdict {
    fn pick(&self, text: &str) -> &'static str {
        self.rules
            .iter()
            .find(|(keyword, _)| text.contains(keyword))
            .map_or(self.fallback, |&(_, verdict)| verdict)
    }
}

struct ForceRules {
    summary: Verdict,
    details: &'static [Verdict],
    closing: Option<&'static str>,
}

static COMPETITION: ForceRules = ForceRules {
    summary: Verdict {
        rules: &[
            (
                "Local SMEs",
                "Competing with other local small businesses. Differentiation is the way to an edge.",
            ),
            (
                "Large companies",
                "Competing with large companies. Local ties and specialist skills are the key differentiators.",
            ),
        ],
        fallback: "Little awareness of competitors. Revisit the market and consider a differentiation strategy.",
    },
    details: &[
        Verdict {
            rules: &[("Clear strength", "The business has a clear strength.")],
            fallback: "The business needs a clearer point of difference.",
        },
        Verdict {
            rules: &[("Yes", "Customers already recognise that strength.")],
            fallback: "Communicate the strength to customers more actively.",
        },
    ],
    closing: Some("Keep differentiating and raising customer value."),
};

static BUYER_POWER: ForceRules = ForceRules {
    summary: Verdict {
        rules: &[
            (
                "Prime contractor-led",
                "Prime contractors hold strong bargaining power. Competitive pricing and quality assurance matter most.",
            ),
            (
                "Price-focused",
                "Customers are price sensitive. Cost efficiency and a clear value proposition are key.",
            ),
        ],
        fallback: "Customer relationships are healthy and long-term trust is building.",
    },
    details: &[
        Verdict {
            rules: &[("Many", "Quotes are compared often.")],
            fallback: "Customers choose on more than price.",
        },
        Verdict {
            rules: &[(
                "Low",
                "Switching is cheap for customers, so value must be delivered continuously.",
            )],
            fallback: "High switching costs keep customers loyal.",
        },
    ],
    closing: None,
};

static SUPPLIER_POWER: ForceRules = ForceRules {
    summary: Verdict {
        rules: &[
            (
                "Mostly in-house",
                "Little dependence on outside suppliers, so supply risk is low.",
            ),
            (
                "Fixed",
                "Heavy reliance on particular suppliers. Consider spreading the work.",
            ),
        ],
        fallback: "Relationships with several suppliers keep supply risk moderate.",
    },
    details: &[Verdict {
        rules: &[("Hard to find", "Securing partner firms is a challenge.")],
        fallback: "Relationships with partner firms are good.",
    }],
    closing: Some("Manage supplier relationships and spread the risk."),
};

static NEW_ENTRANTS: ForceRules = ForceRules {
    summary: Verdict {
        rules: &[
            (
                "Increasing",
                "New entrants are on the rise. Raising barriers and differentiating are urgent.",
            ),
            (
                "Decreasing",
                "Fewer new entrants, reflecting high barriers or a less attractive market.",
            ),
        ],
        fallback: "New entry is steady and the competitive landscape is stable.",
    },
    details: &[Verdict {
        rules: &[(
            "Digital marketing",
            "Newcomers win customers through digital marketing.",
        )],
        fallback: "Newcomers mostly rely on traditional sales.",
    }],
    closing: Some("Maintain entry barriers and strengthen your own advantage."),
};

static SUBSTITUTES: ForceRules = ForceRules {
    summary: Verdict {
        rules: &[
            (
                "Replaceable",
                "Alternatives exist. A distinctive value proposition is essential.",
            ),
            (
                "Hard to replace",
                "Few alternatives exist. Protect the edge that expertise and quality give.",
            ),
        ],
        fallback: "The threat of substitutes is moderate. Keep improving the value offered.",
    },
    details: &[Verdict {
        rules: &[
            ("Cheapness", "Price competition is intense."),
            ("Quality and trust", "Customers value quality and reliability."),
        ],
        fallback: "",
    }],
    closing: Some("Offer unique value that meets the customer's underlying need."),
};

const STRENGTH_SIGNALS: &[(&str, &str)] = &[
    ("Clear strength", "a clear competitive advantage"),
    ("Yes", "customers understand your value"),
    ("Mostly in-house", "low supply risk"),
    ("High switching cost", "customer loyalty"),
];

const CHALLENGE_SIGNALS: &[(&str, &str)] = &[
    ("Nothing in particular", "lack of differentiation"),
    ("Increasing", "the threat of new entrants"),
    ("Replaceable", "the threat of substitutes"),
];

const OVERALL_CLOSING: &str =
    "Build a lasting competitive advantage on local expertise and customer trust.";

fn rules_for(force: Force) -> &'static ForceRules {
    match force {
        Force::Competition => &COMPETITION,
        Force::BuyerPower => &BUYER_POWER,
        Force::SupplierPower => &SUPPLIER_POWER,
        Force::NewEntrants => &NEW_ENTRANTS,
        Force::Substitutes => &SUBSTITUTES,
    }
}

fn joined(answers: &[RecordedAnswer]) -> String {
    answers
        .iter()
        .map(|a| a.answer.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Summary and details for one force.
pub fn analyze_force(force: Force, answers: &[RecordedAnswer]) -> (String, String) {
    let rules = rules_for(force);
    let text = joined(answers);

    let details: Vec<&str> = rules
        .details
        .iter()
        .map(|verdict| verdict.pick(&text))
        .chain(rules.closing)
        .filter(|part| !part.is_empty())
        .collect();

    (rules.summary.pick(&text).to_string(), details.join(" "))
}

/// Strengths and challenges seen across every answer, plus the summary line.
pub fn overall(answers: &[RecordedAnswer]) -> (Vec<String>, Vec<String>, String) {
    let text = joined(answers);
    let signals = |table: &[(&str, &str)]| -> Vec<String> {
        table
            .iter()
            .filter(|(keyword, _)| text.contains(keyword))
            .map(|(_, label)| label.to_string())
            .collect()
    };
    let strengths = signals(STRENGTH_SIGNALS);
    let challenges = signals(CHALLENGE_SIGNALS);

    let mut summary = Vec::new();
    if !strengths.is_empty() {
        summary.push(format!("Strengths: {}.", strengths.join(", ")));
    }
    if !challenges.is_empty() {
        summary.push(format!("Challenges: {} need addressing.", challenges.join(", ")));
    }
    summary.push(OVERALL_CLOSING.to_string());

    (strengths, challenges, summary.join(" "))
}

/// Score every category. `answers` is indexed like `tree.five_forces`.
pub fn build_report(tree: &ForceTree, answers: &[Vec<RecordedAnswer>]) -> AnalysisReport {
    let categories = tree
        .five_forces
        .iter()
        .enumerate()
        .map(|(i, category)| {
            let recorded = answers.get(i).cloned().unwrap_or_default();
            let (summary, details) = analyze_force(category.force, &recorded);
            CategoryAnalysis {
                category: category.category.clone(),
                force: category.force,
                summary,
                details,
                answers: recorded,
            }
        })
        .collect();

    let all: Vec<RecordedAnswer> = answers.iter().flatten().cloned().collect();
    let (strengths, challenges, overall_summary) = overall(&all);

    AnalysisReport {
        categories,
        strengths,
        challenges,
        overall_summary,
    }
}
