/// Keywords whose presence in an expense row's category text marks the row
/// as a debt payment. Spanish and English variants are both present because
/// onboarding data arrives in either language.
const DEBT_KEYWORDS: [&str; 24] = [
    "deuda",
    "debt",
    "tarjeta",
    "credit",
    "card",
    "credito",
    "crédito",
    "prestamo",
    "préstamo",
    "loan",
    "financiamiento",
    "financing",
    "hipoteca",
    "mortgage",
    "auto",
    "car",
    "vehiculo",
    "vehículo",
    "banco",
    "bank",
    "bancario",
    "cuota",
    "mensualidad",
    "payment",
];

/// Decides whether an expense row's category text describes a debt payment.
/// The reconciliation pipeline treats this as a seam so the keyword heuristic
/// can be swapped for a stricter rule without touching the resolver.
pub trait DebtClassifier: Send + Sync {
    fn is_debt_payment(&self, text: &str) -> bool;
}

/// Default classifier: case-insensitive substring match against the fixed
/// keyword set. Known to produce false positives on generic category text;
/// kept for parity with the data this engine consolidates.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordDebtClassifier;

impl DebtClassifier for KeywordDebtClassifier {
    fn is_debt_payment(&self, text: &str) -> bool {
        let lowered = text.to_lowercase();
        DEBT_KEYWORDS.iter().any(|keyword| lowered.contains(keyword))
    }
}
