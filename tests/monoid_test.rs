use inquest::monoid::{concat_all, monoid, Monoid, Semigroup, StringConcat, Sum};
use inquest::validation::{failure_at, success};
use inquest::{
    AltMonoid, AlternativeMonoid, ApplicativeMonoid, Context, Decode, Decoder, Errors,
    ValidationError, ValidationExt,
};

const INPUTS: [&str; 4] = ["1", "20", "x", ""];

fn fail<A: 'static>(message: &str) -> Decode<str, A> {
    Decode::left(Errors::single(ValidationError::new(
        Context::root(),
        message,
    )))
}

fn number() -> Decode<str, i64> {
    Decode::from_fn(|s: &str| match s.parse::<i64>() {
        Ok(n) => success(n),
        Err(_) => failure_at(&Context::root(), "not a number"),
    })
}

fn small() -> Decode<str, i64> {
    Decode::from_fn(|s: &str| match s.parse::<i64>() {
        Ok(n) if n < 10 => success(n),
        _ => failure_at(&Context::root(), "not a small number"),
    })
}

fn text() -> Decode<str, String> {
    Decode::from_fn(|s: &str| success(format!("<{}>", s)))
}

fn assert_same<A: PartialEq + std::fmt::Debug>(left: &Decode<str, A>, right: &Decode<str, A>) {
    for input in INPUTS {
        assert_eq!(left.decode(input), right.decode(input), "input {:?}", input);
    }
}

fn assert_associative<A, M>(m: &M, x: Decode<str, A>, y: Decode<str, A>, z: Decode<str, A>)
where
    A: PartialEq + std::fmt::Debug,
    M: Semigroup<Decode<str, A>>,
{
    let left = m.concat(m.concat(x.clone(), y.clone()), z.clone());
    let right = m.concat(x, m.concat(y, z));
    assert_same(&left, &right);
}

fn assert_identity<A, M>(m: &M, x: Decode<str, A>)
where
    A: PartialEq + std::fmt::Debug,
    M: Monoid<Decode<str, A>>,
{
    assert_same(&m.concat(x.clone(), m.empty()), &x);
    assert_same(&m.concat(m.empty(), x.clone()), &x);
}

// ====== ApplicativeMonoid Tests ======

#[test]
fn test_applicative_string_concat() {
    let m = ApplicativeMonoid::new(StringConcat);
    let d = m.concat(
        Decode::<str, String>::of("Hello".to_string()),
        Decode::of(" World".to_string()),
    );

    for input in INPUTS {
        assert_eq!(d.decode(input), success("Hello World".to_string()));
    }
}

#[test]
fn test_applicative_sum_reports_both_failures() {
    let m = ApplicativeMonoid::new(Sum);
    let d = m.concat(fail::<i64>("first"), fail("second"));

    let errors = d.decode("1").into_errors();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors.messages(), vec!["first", "second"]);
}

#[test]
fn test_applicative_sum_merges_values() {
    let m = ApplicativeMonoid::new(Sum);
    let d = m.concat(number(), Decode::of(100));
    assert_eq!(d.decode("5"), success(105));
}

#[test]
fn test_applicative_identity() {
    let m = ApplicativeMonoid::new(Sum);
    assert_identity(&m, number());
    assert_identity(&m, fail::<i64>("boom"));

    let s = ApplicativeMonoid::new(StringConcat);
    assert_identity(&s, text());
}

#[test]
fn test_applicative_associativity() {
    let m = ApplicativeMonoid::new(Sum);
    assert_associative(&m, number(), small(), Decode::of(3));
    assert_associative(&m, fail("a"), number(), fail("c"));

    let s = ApplicativeMonoid::new(StringConcat);
    assert_associative(&s, text(), Decode::of("-".to_string()), text());
}

#[test]
fn test_applicative_concat_all() {
    let m = ApplicativeMonoid::new(Sum);
    let total = concat_all(&m, vec![number(), number(), Decode::of(1)]);
    assert_eq!(total.decode("4"), success(9));
    assert!(total.decode("x").is_failure());

    let empty: Decode<str, i64> = concat_all(&m, Vec::new());
    assert_eq!(empty.decode("x"), success(0));
}

// ====== AlternativeMonoid Tests ======

#[test]
fn test_alternative_merges_when_both_succeed() {
    let m = AlternativeMonoid::new(Sum);
    let d = m.concat(number(), small());
    assert_eq!(d.decode("4"), success(8));
}

#[test]
fn test_alternative_falls_back_to_succeeding_side() {
    let m = AlternativeMonoid::new(Sum);
    let d = m.concat(number(), small());
    // "20" is a number but not small: only the first side succeeds
    assert_eq!(d.decode("20"), success(20));

    let d = m.concat(fail("never"), small());
    assert_eq!(d.decode("3"), success(3));
}

#[test]
fn test_alternative_keeps_every_attempt_when_all_fail() {
    let m = AlternativeMonoid::new(Sum);
    let d = m.concat(fail::<i64>("left"), fail("right"));

    let errors = d.decode("x").into_errors();
    assert_eq!(errors.messages(), vec!["left", "right", "left", "right"]);
}

#[test]
fn test_alternative_identity_on_succeeding_decoders() {
    let m = AlternativeMonoid::new(Sum);
    assert_identity(&m, Decode::<str, i64>::of(7));
    assert_identity(&m, text().map(|s| s.len() as i64).boxed());

    let s = AlternativeMonoid::new(StringConcat);
    assert_identity(&s, text());
}

#[test]
fn test_alternative_empty_recovers_failures() {
    let m = AlternativeMonoid::new(Sum);
    let d = m.concat(fail::<i64>("boom"), m.empty());
    assert_eq!(d.decode("x"), success(0));
}

#[test]
fn test_alternative_associativity() {
    let m = AlternativeMonoid::new(Sum);
    assert_associative(&m, number(), small(), Decode::of(3));
    assert_associative(&m, Decode::<str, i64>::of(1), Decode::of(2), Decode::of(3));
}

// ====== AltMonoid Tests ======

#[test]
fn test_alt_monoid_three_way_fallback() {
    let m = AltMonoid::new(|| Decode::<str, i64>::of(0));
    let d = m.concat(m.concat(fail::<i64>("first"), fail("second")), Decode::of(42));
    assert_eq!(d.decode("x"), success(42));
}

#[test]
fn test_alt_monoid_first_success_wins() {
    let m = AltMonoid::new(|| Decode::<str, i64>::of(0));
    let d = m.concat(small(), number());
    assert_eq!(d.decode("3"), success(3));
    assert_eq!(d.decode("30"), success(30));
}

#[test]
fn test_alt_monoid_failure_keeps_attempt_order() {
    let m = AltMonoid::new(|| Decode::<str, i64>::left(Errors::empty()));
    let d = concat_all(&m, vec![fail::<i64>("a"), fail("b"), fail("c")]);
    assert_eq!(d.decode("x").into_errors().messages(), vec!["a", "b", "c"]);
}

#[test]
fn test_alt_monoid_identity_with_empty_failure() {
    let m = AltMonoid::new(|| Decode::<str, i64>::left(Errors::empty()));
    assert_identity(&m, number());
    assert_identity(&m, fail::<i64>("boom"));
    assert_identity(&m, Decode::<str, i64>::of(1));
}

#[test]
fn test_alt_monoid_associativity() {
    let m = AltMonoid::new(|| Decode::<str, i64>::of(0));
    assert_associative(&m, fail("a"), small(), number());
    assert_associative(&m, fail::<i64>("a"), fail("b"), fail("c"));
}

// ====== Value Monoid Tests ======

#[test]
fn test_custom_monoid_lifts() {
    let max = monoid(|| i64::MIN, |x: i64, y: i64| x.max(y));
    let m = ApplicativeMonoid::new(max);
    let d = m.concat(number(), Decode::of(10));
    assert_eq!(d.decode("3"), success(10));
    assert_eq!(d.decode("30"), success(30));
    assert_identity(&m, number());
}
