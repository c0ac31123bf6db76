mod util;

use indoc::indoc;
use util::{run_program, NO_ERROR, NO_OUTPUT, RUNTIME_ERROR, SUCCESS};

#[test]
fn methods_are_inherited() {
    let input = indoc! {r#"
        class Doughnut {
          cook() {
            print "Fry until golden brown.";
          }
        }
        class BostonCream < Doughnut {}
        BostonCream().cook();
    "#};
    run_program(input, "Fry until golden brown.\n", NO_ERROR, SUCCESS);
}

#[test]
fn subclass_methods_shadow_superclass_methods() {
    let input = indoc! {r#"
        class A {
          m() {
            print "A";
          }
        }
        class B < A {
          m() {
            print "B";
          }
        }
        B().m();
    "#};
    run_program(input, "B\n", NO_ERROR, SUCCESS);
}

#[test]
fn super_calls_the_superclass_method() {
    let input = indoc! {r#"
        class A {
          m() {
            print "A";
          }
        }
        class B < A {
          m() {
            super.m();
            print "B";
          }
        }
        B().m();
    "#};
    run_program(input, "A\nB\n", NO_ERROR, SUCCESS);
}

#[test]
fn super_binds_to_the_method_owner_not_the_receiver() {
    // C inherits test() from B; inside it, super still means A.
    let input = indoc! {r#"
        class A {
          method() {
            print "A method";
          }
        }
        class B < A {
          method() {
            print "B method";
          }
          test() {
            super.method();
          }
        }
        class C < B {}
        C().test();
    "#};
    run_program(input, "A method\n", NO_ERROR, SUCCESS);
}

#[test]
fn super_method_keeps_this_bound_to_the_receiver() {
    let input = indoc! {r#"
        class A {
          describe() {
            print this.label;
          }
        }
        class B < A {
          describe() {
            super.describe();
          }
        }
        var b = B();
        b.label = "receiver";
        b.describe();
    "#};
    run_program(input, "receiver\n", NO_ERROR, SUCCESS);
}

#[test]
fn initializers_are_inherited() {
    let input = indoc! {"
        class A {
          init(n) {
            this.n = n;
          }
        }
        class B < A {}
        print B(5).n;
    "};
    run_program(input, "5\n", NO_ERROR, SUCCESS);
}

#[test]
fn subclass_init_may_call_super_init() {
    let input = indoc! {"
        class A {
          init(n) {
            this.n = n;
          }
        }
        class B < A {
          init() {
            super.init(2);
            this.n = this.n * 10;
          }
        }
        print B().n;
    "};
    run_program(input, "20\n", NO_ERROR, SUCCESS);
}

#[test]
fn superclass_must_be_a_class() {
    let input = indoc! {r#"
        var NotAClass = "so much fun";
        class Sub < NotAClass {}
    "#};
    let expected_error = indoc! {"
        Superclass must be a class.
        [line 2]
    "};
    run_program(input, NO_OUTPUT, expected_error, RUNTIME_ERROR);
}

#[test]
fn missing_super_method_is_a_runtime_error() {
    let input = indoc! {"
        class A {}
        class B < A {
          m() {
            super.missing();
          }
        }
        B().m();
    "};
    let expected_error = indoc! {"
        Undefined property 'missing'.
        [line 4]
    "};
    run_program(input, NO_OUTPUT, expected_error, RUNTIME_ERROR);
}
