use crate::models::Target;

/// The compiled-in set of services shown on the status page, in display order.
pub fn services() -> Vec<Target> {
    vec![
        Target::http("Web Frontend", "https://www.ircrelay.com"),
        Target::http(
            "Provisioning API",
            "https://ircrelay-api-production.herokuapp.com",
        ),
        Target::tcp("IRC Router", "irc.ircrelay.com:6667"),
    ]
}
