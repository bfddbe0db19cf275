//! Property tests for the Argument Encoder and Variable Bridge
//!
//! These tests verify that:
//! 1. Every string survives quote -> tokenize as exactly one word
//! 2. Every valid variable name survives env_key -> from_env_key

use kakbridge_core::{quote, tokenize, Var, VarKind};
use proptest::prelude::*;

proptest! {
    #[test]
    fn quote_round_trips_any_string(s in any::<String>()) {
        let words = tokenize(&quote(&s)).unwrap();
        prop_assert_eq!(words, vec![s]);
    }

    #[test]
    fn quote_round_trips_quote_heavy_strings(s in "[\"\n a'%{}]{0,32}") {
        let words = tokenize(&quote(&s)).unwrap();
        prop_assert_eq!(words, vec![s]);
    }

    #[test]
    fn quoted_arguments_stay_separate(args in prop::collection::vec(any::<String>(), 0..6)) {
        let line = std::iter::once("set-option".to_string())
            .chain(args.iter().map(|a| quote(a)))
            .collect::<Vec<_>>()
            .join(" ");
        let words = tokenize(&line).unwrap();
        prop_assert_eq!(&words[0], "set-option");
        prop_assert_eq!(&words[1..], &args[..]);
    }

    #[test]
    fn option_names_round_trip(name in "[A-Za-z0-9][A-Za-z0-9_]{0,24}") {
        prop_assume!(!name.starts_with("kak_"));
        let var = Var::option(name.clone()).unwrap();
        prop_assert_eq!(Var::from_env_key(&var.env_key()), Some(var));
    }

    #[test]
    fn plain_names_round_trip(name in "[A-Za-z0-9][A-Za-z0-9_]{0,24}") {
        prop_assume!(!name.starts_with("kak_"));
        prop_assume!(!name.starts_with("opt_") && !name.starts_with("reg_"));
        let var = Var::plain(name.clone()).unwrap();
        let back = Var::from_env_key(&var.env_key()).unwrap();
        prop_assert_eq!(back.kind(), VarKind::Plain);
        prop_assert_eq!(back.name(), name.as_str());
    }
}
