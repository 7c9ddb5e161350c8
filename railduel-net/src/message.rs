use strum_macros::{Display, EnumString};

/// The kinds of messages exchanged between the game authority and a remote
/// player, in the order they usually occur.
///
/// The first four are notifications and carry no reply; every other kind
/// elicits exactly one reply line holding the serialized result.
#[derive(Clone, Copy, Debug, Display, EnumString, Eq, PartialEq)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageId {
    InitPlayers,
    ReceiveInfo,
    UpdateState,
    SetInitialTickets,
    ChooseInitialTickets,
    NextTurn,
    ChooseTickets,
    DrawSlot,
    Route,
    Cards,
    ChooseAdditionalCards,
}
