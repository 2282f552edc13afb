//! Built-in detection rules, grouped by detection family.

mod support;

mod grammar;
mod notation;
mod readability;
mod style;
mod tech_terms;

pub use grammar::{
    DoubleNegationRule, DoubledParticleRule, NoParticleChainRule, NounChainRule, RaNukiRule,
    SahenVerbRule,
};
pub use notation::{
    CustomNotationRule, HomophoneRule, HonorificErrorRule, KanjiOpeningRule, OkuriganaRule,
    RedundantExpressionRule, TermNotationRule, WeakExpressionRule,
};
pub use readability::{
    AdversativeGaRule, CommaCountRule, ConjunctionRepetitionRule, LongSentenceRule,
    MissingSubjectRule, MonotonousEndingRule, PassiveOveruseRule,
};
pub use style::{
    AlphabetWidthRule, BracketStyleRule, DashTildeRule, DateFormatRule, KanaWidthRule,
    KatakanaLongVowelRule, KutenStyleRule, NakaguroRule, NumberWidthRule, NumeralStyleRule,
    StyleConsistencyRule,
};
pub use tech_terms::{AwsTermsRule, AzureTermsRule, GcpTermsRule, GenerativeAiTermsRule, WebTermsRule};
