//! Display names for group rank levels.

const RANK_NAMES: [&str; 5] = ["Bronze", "Silver", "Gold", "Platinum", "Diamond"];

const ROMAN_NUMERALS: [(u32, &str); 5] = [(10, "X"), (9, "IX"), (5, "V"), (4, "IV"), (1, "I")];

/// Name of a rank level. Levels past Diamond continue as "Diamond II",
/// "Diamond III", ...; level 0 reads as Bronze.
pub fn rank_name(level: u32) -> String {
    match level {
        0 => RANK_NAMES[0].to_string(),
        1..=5 => RANK_NAMES[(level - 1) as usize].to_string(),
        _ => format!("Diamond {}", to_roman(level - 4)),
    }
}

fn to_roman(mut num: u32) -> String {
    let mut result = String::new();
    for (value, numeral) in ROMAN_NUMERALS {
        while num >= value {
            result.push_str(numeral);
            num -= value;
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_ranks() {
        assert_eq!(rank_name(1), "Bronze");
        assert_eq!(rank_name(3), "Gold");
        assert_eq!(rank_name(5), "Diamond");
        assert_eq!(rank_name(0), "Bronze");
    }

    #[test]
    fn test_diamond_tiers() {
        assert_eq!(rank_name(6), "Diamond II");
        assert_eq!(rank_name(8), "Diamond IV");
        assert_eq!(rank_name(13), "Diamond IX");
        assert_eq!(rank_name(14), "Diamond X");
        assert_eq!(rank_name(23), "Diamond XIX");
    }
}
