//! Sir Quailbert's voice: every fixed line the bot says.

use once_cell::sync::Lazy;

pub const NPC_NAME: &str = "Sir Quailbert the Wanderer";

pub const INTRO_MESSAGE: &str = "Greetings, travelers! I am Sir Quailbert the Wanderer, a humble quail of lore and legend. \
     Step forth, and mayhap you shall receive wisdom, trivia, or even a Shrubbery Cent!";

pub const LEADERBOARD_EMPTY: &str =
    "The leaderboard is empty. Earn Shrubbery Cents to take your place in the legendary leaderboard!";

pub const LEADERBOARD_HEADER: &str = "**Legendary Quail Leaderboard**";

/// Phrases that count as a greeting anywhere in a message.
const GREETING_PHRASES: &[&str] = &[
    "hello", "hi", "greetings", "hail", "hola", "bonjour", "salut", "ni hao", "hai", "namaste",
    "namaskar", "marhaban", "ahlan", "ola", "oi", "privet", "zdravstvuyte", "hallo", "ciao",
    "salve", "habari", "jambo", "merhaba", "selam", "hoi", "yia sas", "yia sou", "sawasdee",
    "xin chao", "chao", "kumusta", "shalom", "salam", "halo", "apa kabar", "cheers", "prost",
    "salud", "skol", "santé", "cin cin", "na zdravi", "kanpai", "kampai", "sláinte", "proost",
    "egészségedre", "chin chin", "za zdorovye", "skal", "kippis", "prozit", "a votre sante",
    "le chaim", "yamas", "good morning", "buenos días", "guten morgen", "buongiorno",
    "dobroye utro", "ohayou", "selamat pagi", "sabah el kheir", "dobré ráno", "boker tov",
    "suprabhat", "bom dia", "magandang umaga", "good night", "buenas noches", "bonne nuit",
    "gute nacht", "buona notte", "spokoynoy nochi", "oyasumi", "selamat malam", "layla tov",
    "shubh raatri", "boa noite", "Hallo zusammen", "magandang gabi",
];

/// The greeting phrases, lower-cased.
pub static GREETINGS: Lazy<Vec<String>> =
    Lazy::new(|| GREETING_PHRASES.iter().map(|g| g.to_lowercase()).collect());

/// "Shrubbery Cent" with a plural `s` above one.
pub fn cents(amount: u64) -> String {
    if amount > 1 {
        format!("{amount} Shrubbery Cents")
    } else {
        format!("{amount} Shrubbery Cent")
    }
}

pub fn fallback_greeting(name: &str) -> String {
    format!("Well met, {name}! Sir Quailbert tips his feather to you.")
}

pub fn no_trivia(prefix: char) -> String {
    format!(
        "Sir Quailbert has run out of trivia questions! Please add more using the {prefix}addtrivia command."
    )
}

pub fn trivia_question(question: &str) -> String {
    format!("Trivia from Sir Quailbert: {question}")
}

pub fn trivia_correct(name: &str, fun_fact: &str, reward: u64) -> String {
    format!(
        "All right Quail! You are correct, {name}! {fun_fact} Sir Quailbert grants you {} as a reward!",
        cents(reward)
    )
}

pub fn trivia_incorrect(answer: &str) -> String {
    format!(
        "Alas, that is incorrect. The correct answer was '{answer}'. Better luck next time, brave traveler!"
    )
}

pub fn trivia_timed_out(answer: &str) -> String {
    format!(
        "Time's up! Sir Quailbert grows weary of waiting. The correct answer was '{answer}'."
    )
}

pub fn trivia_added(question: &str, answer: &str, name: &str) -> String {
    format!("New trivia added: '{question}' with answer '{answer}'. Thank you, {name}!")
}

pub fn leaderboard_line(rank: usize, name: &str, points: u64) -> String {
    format!("{rank}. {name} - {}", cents(points))
}

pub fn sweep_announcement(name: &str, bonus: u64) -> String {
    format!(
        "Hear ye, hear ye! Sir Quailbert has awarded {name} {} for their recent deeds in Quailwood, cannot thank you enough!",
        cents(bonus)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cents_plural() {
        assert_eq!(cents(1), "1 Shrubbery Cent");
        assert_eq!(cents(5), "5 Shrubbery Cents");
    }

    #[test]
    fn test_greetings_lowercased() {
        assert!(GREETINGS.iter().all(|g| *g == g.to_lowercase()));
        assert!(GREETINGS.iter().any(|g| g == "hallo zusammen"));
    }

    #[test]
    fn test_no_trivia_uses_prefix() {
        assert!(no_trivia('?').contains("?addtrivia"));
    }
}
