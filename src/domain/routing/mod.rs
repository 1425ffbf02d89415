//! Query routing: handler names, the rule table, classification, model
//! reply parsing, and the response envelope.

mod arguments;
mod classifier;
mod envelope;
mod handler;
mod intent;
mod model_reply;
mod rules;

pub use arguments::{ArgValue, Arguments};
pub use classifier::{IntentClassifier, PatternClassifier};
pub use envelope::{
    EnvelopeBody, EnvelopeError, HandlerOutput, HandlerResult, ResponseEnvelope, DISPLAY_DECIMALS,
};
pub use handler::{Domain, HandlerName, Route, UnknownName};
pub use intent::{Intent, Provenance};
pub use model_reply::{
    complete_arguments, parse_structured_reply, ModelDecision, ModelReply, ReplyParseError,
    UNUSABLE_REPLY,
};
pub use rules::{Extraction, Rule, RuleTable};
