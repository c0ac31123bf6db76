mod util;

use indoc::indoc;
use util::{run_program, NO_OUTPUT, STATIC_ERROR};

#[test]
fn return_at_top_level_is_a_static_error() {
    let input = indoc! {"
        fun f() {
          return 1;
        }
        var x = f;
        return 2;
    "};
    let expected_error = indoc! {"
        [line 5] Error at 'return': Can't return from top-level code.
    "};
    run_program(input, NO_OUTPUT, expected_error, STATIC_ERROR);
}

#[test]
fn reading_a_local_in_its_own_initializer_is_a_static_error() {
    let input = indoc! {"
        var a = 1;
        {
          var a = a;
        }
    "};
    let expected_error = indoc! {"
        [line 3] Error at 'a': Can't read local variable in its own initializer.
    "};
    run_program(input, NO_OUTPUT, expected_error, STATIC_ERROR);
}

#[test]
fn duplicate_local_declaration_is_a_static_error() {
    let input = indoc! {"
        fun bad() {
          var a = 1;
          var a = 2;
        }
    "};
    let expected_error = indoc! {"
        [line 3] Error at 'a': Already a variable with this name in this scope.
    "};
    run_program(input, NO_OUTPUT, expected_error, STATIC_ERROR);
}

#[test]
fn duplicate_parameter_is_a_static_error() {
    let input = indoc! {"
        fun pair(a, a) {}
    "};
    let expected_error = indoc! {"
        [line 1] Error at 'a': Already a variable with this name in this scope.
    "};
    run_program(input, NO_OUTPUT, expected_error, STATIC_ERROR);
}

#[test]
fn this_outside_a_class_is_a_static_error() {
    let expected_error = indoc! {"
        [line 1] Error at 'this': Can't use 'this' outside of a class.
    "};
    run_program("print this;", NO_OUTPUT, expected_error, STATIC_ERROR);
}

#[test]
fn super_outside_a_class_is_a_static_error() {
    let expected_error = indoc! {"
        [line 1] Error at 'super': Can't use 'super' outside of a class.
    "};
    run_program("super.cook();", NO_OUTPUT, expected_error, STATIC_ERROR);
}

#[test]
fn super_without_a_superclass_is_a_static_error() {
    let input = indoc! {"
        class Doughnut {
          cook() {
            super.cook();
          }
        }
    "};
    let expected_error = indoc! {"
        [line 3] Error at 'super': Can't use 'super' in a class with no superclass.
    "};
    run_program(input, NO_OUTPUT, expected_error, STATIC_ERROR);
}

#[test]
fn a_class_cannot_inherit_from_itself() {
    let expected_error = indoc! {"
        [line 1] Error at 'A': A class can't inherit from itself.
    "};
    run_program("class A < A {}", NO_OUTPUT, expected_error, STATIC_ERROR);
}

#[test]
fn returning_a_value_from_an_initializer_is_a_static_error() {
    let input = indoc! {"
        class A {
          init() {
            return 1;
          }
        }
    "};
    let expected_error = indoc! {"
        [line 3] Error at 'return': Can't return a value from an initializer.
    "};
    run_program(input, NO_OUTPUT, expected_error, STATIC_ERROR);
}

#[test]
fn static_errors_accumulate_and_skip_execution() {
    let input = indoc! {r#"
        print "never printed";
        return 1;
        {
          var a = a;
        }
    "#};
    let expected_error = indoc! {"
        [line 2] Error at 'return': Can't return from top-level code.
        [line 4] Error at 'a': Can't read local variable in its own initializer.
    "};
    run_program(input, NO_OUTPUT, expected_error, STATIC_ERROR);
}
