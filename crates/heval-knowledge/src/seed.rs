//! Expert exemplars shipped with the engine.

use chrono::Utc;
use tracing::info;

use heval_core::errors::HevalResult;
use heval_core::models::{KnowledgeExemplar, Provenance};
use heval_core::traits::{IEmbeddingProvider, IKnowledgeIndex};

struct SeedEntry {
    id: &'static str,
    heuristic_id: &'static str,
    criterion_id: &'static str,
    category: &'static str,
    situation: &'static str,
    resolution: &'static str,
}

const SEED: &[SeedEntry] = &[
    SeedEntry {
        id: "kb_001",
        heuristic_id: "H1",
        criterion_id: "H1.2",
        category: "Button Feedback",
        situation: "Buttons should provide clear visual feedback on hover, active, and disabled states so users understand interactability and system response.",
        resolution: "Give the primary button a darker shade on hover and a visible pressed state on click.",
    },
    SeedEntry {
        id: "kb_002",
        heuristic_id: "H3",
        criterion_id: "H3.3",
        category: "Error Prevention",
        situation: "Destructive actions like delete should always be preceded by a confirmation dialog to prevent accidental data loss.",
        resolution: "Make the delete button open a modal: 'Are you sure you want to delete this item? This action cannot be undone.'",
    },
    SeedEntry {
        id: "kb_003",
        heuristic_id: "H1",
        criterion_id: "H1.1",
        category: "Form Labels",
        situation: "Input fields need visible labels; placeholders complement labels rather than replace them, so the form state stays legible while the user types.",
        resolution: "Label the email field 'Email Address' and use 'you@example.com' as its placeholder.",
    },
    SeedEntry {
        id: "kb_004",
        heuristic_id: "H2",
        criterion_id: "H2.2",
        category: "User-Friendly Language",
        situation: "Use action-oriented, conversational language that matches user expectations. Avoid technical jargon in user-facing text.",
        resolution: "Write 'Send Message' instead of 'Submit Payload' and 'Create Account' instead of 'Register User'.",
    },
    SeedEntry {
        id: "kb_005",
        heuristic_id: "H3",
        criterion_id: "H3.2",
        category: "Navigation",
        situation: "Always provide a clear way to exit or cancel actions. Users should never feel trapped in the interface.",
        resolution: "Give every step of a multi-step wizard a Back button and a Cancel option.",
    },
    SeedEntry {
        id: "kb_006",
        heuristic_id: "H4",
        criterion_id: "H4.1",
        category: "Consistency",
        situation: "Users should not have to wonder whether different words, situations, or actions mean the same thing. Follow platform conventions.",
        resolution: "Use standard platform icons such as a magnifying glass for search, and keep terminology consistent: do not mix 'Delete' and 'Remove'.",
    },
    SeedEntry {
        id: "kb_007",
        heuristic_id: "H5",
        criterion_id: "H5.1",
        category: "Error Prevention",
        situation: "Prevent errors from occurring in the first place by using constraints and good defaults.",
        resolution: "Disable past dates in the departure date picker and make numeric fields reject alphabetic characters.",
    },
    SeedEntry {
        id: "kb_008",
        heuristic_id: "H6",
        criterion_id: "H6.1",
        category: "Recognition over Recall",
        situation: "Minimize memory load by making objects, actions, and options visible. Users should not have to remember information from one part of the dialogue to another.",
        resolution: "Show recent searches under the search bar and keep menu items visible instead of hiding them deep in sub-menus.",
    },
    SeedEntry {
        id: "kb_009",
        heuristic_id: "H7",
        criterion_id: "H7.1",
        category: "Flexibility and Efficiency",
        situation: "Accelerators unseen by the novice user may speed up interaction for the expert user.",
        resolution: "Support keyboard shortcuts such as Ctrl+S to save and let users customize their dashboard layout.",
    },
    SeedEntry {
        id: "kb_010",
        heuristic_id: "H8",
        criterion_id: "H8.1",
        category: "Aesthetic and Minimalist Design",
        situation: "Dialogues should not contain irrelevant or rarely needed information. Every extra unit of information competes with the relevant units.",
        resolution: "Remove rarely used metadata from the main table view and use whitespace to group related elements.",
    },
    SeedEntry {
        id: "kb_011",
        heuristic_id: "H9",
        criterion_id: "H9.1",
        category: "Error Recovery",
        situation: "Error messages should use plain language without codes, state the problem precisely, and suggest a solution.",
        resolution: "Instead of 'Error 503', show 'Connection failed. Please check your internet and try again.'",
    },
    SeedEntry {
        id: "kb_012",
        heuristic_id: "H10",
        criterion_id: "H10.1",
        category: "Help and Documentation",
        situation: "Even when the system can be used without documentation, help may be necessary.",
        resolution: "Provide contextual tooltips for complex settings and a searchable help center.",
    },
];

/// Embed the shipped expert exemplars. Situation text is prefixed with its
/// category so the category name contributes to matching.
pub fn seed_exemplars(embedder: &dyn IEmbeddingProvider) -> HevalResult<Vec<KnowledgeExemplar>> {
    let now = Utc::now();
    SEED.iter()
        .map(|entry| -> HevalResult<KnowledgeExemplar> {
            let situation = format!("{}: {}", entry.category, entry.situation);
            Ok(KnowledgeExemplar {
                exemplar_id: entry.id.to_string(),
                heuristic_id: entry.heuristic_id.to_string(),
                criterion_id: entry.criterion_id.to_string(),
                embedding: embedder.embed(&situation)?,
                situation,
                resolution: entry.resolution.to_string(),
                provenance: Provenance::Expert,
                created_at: now,
            })
        })
        .collect()
}

/// Insert every seed exemplar into `index`. Returns the number inserted.
pub fn seed_index(
    index: &dyn IKnowledgeIndex,
    embedder: &dyn IEmbeddingProvider,
) -> HevalResult<usize> {
    let exemplars = seed_exemplars(embedder)?;
    let count = exemplars.len();
    for exemplar in exemplars {
        index.insert(exemplar)?;
    }
    info!(count, provider = embedder.name(), "seeded expert exemplars");
    Ok(count)
}
