/// Derives the avatar token shown next to a participant: one or two upper-case
/// characters taken from the local part of the email, or `?` when nothing
/// usable is left after normalization.
pub fn initials_from_email(email: &str) -> String {
    let local = email.split('@').next().unwrap_or_default();
    let normalized: String = local
        .chars()
        .map(|c| if matches!(c, '_' | '.' | '-') { ' ' } else { c })
        .collect();

    let mut parts = normalized.split_whitespace();
    let mut picked: Vec<char> = Vec::with_capacity(2);
    if let Some(first) = parts.next() {
        let mut chars = first.chars();
        picked.extend(chars.next());
        match parts.next().and_then(|second| second.chars().next()) {
            Some(c) => picked.push(c),
            None => picked.extend(chars.next()),
        }
    }

    if picked.is_empty() {
        return "?".to_string();
    }

    // One upper-case char per picked char; multi-char expansions (e.g. 'ß')
    // would otherwise push the token past two characters.
    picked
        .into_iter()
        .map(|c| c.to_uppercase().next().unwrap_or(c))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_and_second_name_part() {
        assert_eq!(initials_from_email("john_doe@x.com"), "JD");
        assert_eq!(initials_from_email("mary.jane.watson@mergington.edu"), "MJ");
        assert_eq!(initials_from_email("anne-marie@x.com"), "AM");
    }

    #[test]
    fn single_part_uses_its_second_char() {
        assert_eq!(initials_from_email("michael@mergington.edu"), "MI");
        assert_eq!(initials_from_email("a@x.com"), "A");
        assert_eq!(initials_from_email("_a_@x.com"), "A");
    }

    #[test]
    fn nothing_derivable_gives_question_mark() {
        assert_eq!(initials_from_email("@x.com"), "?");
        assert_eq!(initials_from_email("_.-@x.com"), "?");
        assert_eq!(initials_from_email(""), "?");
    }

    #[test]
    fn only_the_first_at_splits() {
        assert_eq!(initials_from_email("bob@@x.com"), "BO");
        assert_eq!(initials_from_email("plainaddress"), "PL");
    }

    #[test]
    fn token_is_short_and_upper_case() {
        for email in [
            "ß@x.com",
            "éloïse.dupont@x.fr",
            "x_y_z@x.com",
            "   @x.com",
            "Ωmega@x.com",
        ] {
            let token = initials_from_email(email);
            let count = token.chars().count();
            assert!((1..=2).contains(&count), "{email} -> {token}");
            assert_eq!(token, token.to_uppercase(), "{email} -> {token}");
        }
    }
}
