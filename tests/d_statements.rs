mod util;

use indoc::indoc;
use util::{run_program, NO_ERROR, NO_OUTPUT, RUNTIME_ERROR, SUCCESS};

#[test]
fn print_statement() {
    run_program("print 1 + 2;", "3\n", NO_ERROR, SUCCESS);
    run_program("print \"hello\";", "hello\n", NO_ERROR, SUCCESS);
    run_program("print nil;", "nil\n", NO_ERROR, SUCCESS);
}

#[test]
fn variables_declare_assign_read() {
    let input = indoc! {r#"
        var x = "foo";
        x = x + "bar";
        print x;
    "#};
    run_program(input, "foobar\n", NO_ERROR, SUCCESS);
}

#[test]
fn uninitialized_variable_is_nil() {
    let input = indoc! {"
        var x;
        print x;
    "};
    run_program(input, "nil\n", NO_ERROR, SUCCESS);
}

#[test]
fn blocks_shadow_and_restore() {
    let input = indoc! {"
        var a = 1;
        {
          var a = 2;
          print a;
        }
        print a;
    "};
    run_program(input, "2\n1\n", NO_ERROR, SUCCESS);
}

#[test]
fn inner_blocks_see_and_mutate_outer_variables() {
    let input = indoc! {"
        var a = 1;
        {
          a = a + 1;
          print a;
        }
        print a;
    "};
    run_program(input, "2\n2\n", NO_ERROR, SUCCESS);
}

#[test]
fn globals_may_be_redeclared() {
    let input = indoc! {"
        var a = 1;
        var a = 2;
        print a;
    "};
    run_program(input, "2\n", NO_ERROR, SUCCESS);
}

#[test]
fn assignment_is_an_expression() {
    let input = indoc! {"
        var a = 1;
        print a = 2;
        print a;
    "};
    run_program(input, "2\n2\n", NO_ERROR, SUCCESS);
}

#[test]
fn if_else() {
    let input = indoc! {r#"
        if (1 < 2) print "then"; else print "else";
        if (nil) print "then"; else print "else";
    "#};
    run_program(input, "then\nelse\n", NO_ERROR, SUCCESS);
}

#[test]
fn while_loop() {
    let input = indoc! {"
        var i = 3;
        while (i > 0) {
          print i;
          i = i - 1;
        }
    "};
    run_program(input, "3\n2\n1\n", NO_ERROR, SUCCESS);
}

#[test]
fn for_loop() {
    let input = indoc! {"
        for (var i = 0; i < 3; i = i + 1) print i;
    "};
    run_program(input, "0\n1\n2\n", NO_ERROR, SUCCESS);
}

#[test]
fn for_loop_variable_is_scoped_to_the_loop() {
    let input = indoc! {"
        for (var i = 0; i < 1; i = i + 1) {}
        print i;
    "};
    let expected_error = indoc! {"
        Undefined variable 'i'.
        [line 2]
    "};
    run_program(input, NO_OUTPUT, expected_error, RUNTIME_ERROR);
}

#[test]
fn for_loop_with_outside_initializer() {
    let input = indoc! {"
        var i;
        for (i = 0; i < 2; i = i + 1) print i;
        print i;
    "};
    run_program(input, "0\n1\n2\n", NO_ERROR, SUCCESS);
}

#[test]
fn logical_operators_return_the_operand() {
    let input = indoc! {r#"
        print "hi" or 2;
        print nil or "yes";
        print nil and "never";
        print 1 and 2;
    "#};
    run_program(input, "hi\nyes\nnil\n2\n", NO_ERROR, SUCCESS);
}

#[test]
fn logical_operators_short_circuit() {
    let input = indoc! {"
        var a = 1;
        true or (a = 2);
        print a;
        false and (a = 3);
        print a;
    "};
    run_program(input, "1\n1\n", NO_ERROR, SUCCESS);
}

#[test]
fn undefined_variable_read_is_a_runtime_error() {
    let expected_error = indoc! {"
        Undefined variable 'x'.
        [line 1]
    "};
    run_program("print x;", NO_OUTPUT, expected_error, RUNTIME_ERROR);
}

#[test]
fn assignment_to_undeclared_global_is_a_runtime_error() {
    let expected_error = indoc! {"
        Undefined variable 'x'.
        [line 1]
    "};
    run_program("x = 1;", NO_OUTPUT, expected_error, RUNTIME_ERROR);
}

#[test]
fn runtime_error_stops_execution() {
    let input = indoc! {r#"
        print "before";
        print 1 + "a";
        print "after";
    "#};
    let expected_error = indoc! {"
        Operands must be two numbers or two strings.
        [line 2]
    "};
    run_program(input, "before\n", expected_error, RUNTIME_ERROR);
}
