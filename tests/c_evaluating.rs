mod util;

use indoc::indoc;
use util::{run_evaluate, NO_ERROR, NO_OUTPUT, RUNTIME_ERROR, SUCCESS};

#[test]
fn arithmetic() {
    run_evaluate("1 + 2", "3\n", NO_ERROR, SUCCESS);
    run_evaluate("5 / 2", "2.5\n", NO_ERROR, SUCCESS);
    run_evaluate("3 * 4 - 2", "10\n", NO_ERROR, SUCCESS);
    run_evaluate("-(-3)", "3\n", NO_ERROR, SUCCESS);
}

#[test]
fn integral_results_print_without_decimal_point() {
    run_evaluate("10 / 4 * 2", "5\n", NO_ERROR, SUCCESS);
    run_evaluate("0.5 + 0.5", "1\n", NO_ERROR, SUCCESS);
}

#[test]
fn string_concatenation() {
    run_evaluate("\"foo\" + \"bar\"", "foobar\n", NO_ERROR, SUCCESS);
    run_evaluate("\"\" + \"x\"", "x\n", NO_ERROR, SUCCESS);
}

#[test]
fn truthiness() {
    // Only nil and false are falsey; zero and "" are truthy.
    run_evaluate("!nil", "true\n", NO_ERROR, SUCCESS);
    run_evaluate("!false", "true\n", NO_ERROR, SUCCESS);
    run_evaluate("!0", "false\n", NO_ERROR, SUCCESS);
    run_evaluate("!\"\"", "false\n", NO_ERROR, SUCCESS);
}

#[test]
fn comparisons() {
    run_evaluate("10 > 5", "true\n", NO_ERROR, SUCCESS);
    run_evaluate("2 <= 2", "true\n", NO_ERROR, SUCCESS);
    run_evaluate("1 >= 2", "false\n", NO_ERROR, SUCCESS);
}

#[test]
fn equality() {
    run_evaluate("nil == nil", "true\n", NO_ERROR, SUCCESS);
    run_evaluate("1 == 1", "true\n", NO_ERROR, SUCCESS);
    run_evaluate("\"a\" == \"a\"", "true\n", NO_ERROR, SUCCESS);
    // Different variants never compare equal.
    run_evaluate("1 == \"1\"", "false\n", NO_ERROR, SUCCESS);
    run_evaluate("nil == false", "false\n", NO_ERROR, SUCCESS);
    run_evaluate("1 != 2", "true\n", NO_ERROR, SUCCESS);
}

#[test]
fn nan_is_not_equal_to_itself() {
    run_evaluate("(0 / 0) == (0 / 0)", "false\n", NO_ERROR, SUCCESS);
}

#[test]
fn division_by_zero_follows_ieee754() {
    run_evaluate("1 / 0", "inf\n", NO_ERROR, SUCCESS);
    run_evaluate("-1 / 0", "-inf\n", NO_ERROR, SUCCESS);
    run_evaluate("0 / 0", "NaN\n", NO_ERROR, SUCCESS);
}

#[test]
fn unary_minus_requires_a_number() {
    let expected_error = indoc! {"
        Operand must be a number.
        [line 1]
    "};
    run_evaluate("-\"muffin\"", NO_OUTPUT, expected_error, RUNTIME_ERROR);
}

#[test]
fn arithmetic_requires_numbers() {
    let expected_error = indoc! {"
        Operands must be numbers.
        [line 1]
    "};
    run_evaluate("true * 2", NO_OUTPUT, expected_error, RUNTIME_ERROR);
    run_evaluate("1 < \"2\"", NO_OUTPUT, expected_error, RUNTIME_ERROR);
}

#[test]
fn plus_requires_matching_operands() {
    let expected_error = indoc! {"
        Operands must be two numbers or two strings.
        [line 1]
    "};
    run_evaluate("1 + \"a\"", NO_OUTPUT, expected_error, RUNTIME_ERROR);
    run_evaluate("\"a\" + nil", NO_OUTPUT, expected_error, RUNTIME_ERROR);
}
