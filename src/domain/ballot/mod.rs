//! Ballots: types, positions, the projection over DocEvents, and the rules
//! for opening, closing and voting.

mod ballot_type;
mod edit;
mod needed;
mod position;
mod projection;
mod protocol;

pub use ballot_type::{BallotType, VotingBody};
pub use edit::{plan_position_change, PositionSubmission};
pub use needed::{needed_positions, BallotOutcome};
pub use position::PositionName;
pub use projection::{Ballot, BallotPosition};
pub use protocol::{close_ballot, close_open_ballots, create_ballot, create_ballot_if_not_open};
