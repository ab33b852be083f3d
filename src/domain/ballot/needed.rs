//! "Needed positions" text for ballot summaries.

use serde::Serialize;

use crate::domain::document::Document;

use super::{BallotType, PositionName, VotingBody};

/// Whether a ballot has enough support, and a sentence explaining it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BallotOutcome {
    pub passes: bool,
    pub text: String,
}

fn count(positions: &[PositionName], pos: PositionName) -> usize {
    positions.iter().filter(|p| **p == pos).count()
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("a {}", word)
    } else if word.ends_with('S') {
        format!("{} {}es", n, word)
    } else {
        format!("{} {}s", n, word)
    }
}

fn more(missing: usize, what: &str) -> String {
    if missing == 1 {
        format!("Needs one more {} position to pass.", what)
    } else {
        format!("Needs {} more {} positions to pass.", missing, what)
    }
}

/// Evaluates a ballot given one position per eligible balloter.
///
/// Balloters without a position count as `NoRecord`.
pub fn needed_positions(
    ballot_type: BallotType,
    doc: &Document,
    positions: &[PositionName],
) -> BallotOutcome {
    match ballot_type.voting_body() {
        VotingBody::Iesg => iesg(ballot_type, doc, positions),
        VotingBody::Irsg => irsg(positions),
        VotingBody::Rsab => rsab(positions),
    }
}

fn iesg(ballot_type: BallotType, doc: &Document, positions: &[PositionName]) -> BallotOutcome {
    let yes = count(positions, PositionName::Yes);
    let noobj = count(positions, PositionName::NoObj);
    let recused = count(positions, PositionName::Recuse);
    let blocking: Vec<PositionName> = positions.iter().copied().filter(|p| p.is_blocking()).collect();
    let blocking_word = match ballot_type {
        BallotType::DraftApprove => "DISCUSS",
        _ => "BLOCK",
    };

    let mut answer = Vec::new();
    if yes < 1 {
        answer.push("Needs a YES.".to_string());
    }
    if !blocking.is_empty() {
        answer.push(format!("Has {}.", plural(blocking.len(), blocking_word)));
    }

    let standards_track = ballot_type == BallotType::DraftApprove
        && doc
            .intended_std_level()
            .is_some_and(|level| level.is_standards_track());
    let needed = if standards_track {
        let voting = positions.len().saturating_sub(recused);
        (voting * 2).div_ceil(3)
    } else {
        if yes < 1 {
            return BallotOutcome {
                passes: false,
                text: answer.join(" "),
            };
        }
        1
    };

    let have = yes + noobj;
    if have < needed {
        answer.push(more(needed - have, "YES or NO OBJECTION"));
    } else if !blocking.is_empty() {
        answer.push(format!(
            "Has enough positions to pass once {} positions are resolved.",
            blocking_word
        ));
    } else {
        answer.push("Has enough positions to pass.".to_string());
    }

    BallotOutcome {
        passes: yes >= 1 && have >= needed && blocking.is_empty(),
        text: answer.join(" "),
    }
}

fn irsg(positions: &[PositionName]) -> BallotOutcome {
    let yes = count(positions, PositionName::Yes);
    let not_ready = count(positions, PositionName::NotReady);
    let needed = 2;

    let mut answer = Vec::new();
    if not_ready > 0 {
        answer.push(format!("Has {}.", plural(not_ready, "NOT READY")));
    }
    if yes < needed {
        answer.push(more(needed - yes, "YES"));
    } else if not_ready > 0 {
        answer.push("Has enough positions to pass once NOT READY positions are resolved.".to_string());
    } else {
        answer.push("Has enough positions to pass.".to_string());
    }

    BallotOutcome {
        passes: yes >= needed && not_ready == 0,
        text: answer.join(" "),
    }
}

fn rsab(positions: &[PositionName]) -> BallotOutcome {
    let yes = count(positions, PositionName::Yes);
    let concerns = count(positions, PositionName::Concern);
    let recused = count(positions, PositionName::Recuse);
    let needed = positions.len().saturating_sub(recused).max(1);

    let mut answer = Vec::new();
    if concerns > 0 {
        answer.push(format!("Has {}.", plural(concerns, "CONCERN")));
    }
    if yes < needed {
        answer.push(more(needed - yes, "YES"));
    } else if concerns > 0 {
        answer.push("Has enough positions to pass once CONCERN positions are resolved.".to_string());
    } else {
        answer.push("Has enough positions to pass.".to_string());
    }

    BallotOutcome {
        passes: yes >= needed && concerns == 0,
        text: answer.join(" "),
    }
}
