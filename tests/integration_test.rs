// ABOUTME: End-to-end scenarios driving the whole pipeline (lex -> parse -> eval)

use glam::error::GlamError;
use glam::interp::Interpreter;
use glam::io::BufferIo;
use glam::{lexer, parser};

/// Lexes, parses, and runs a whole program against a fresh interpreter
/// with a buffer-backed IO adapter, returning the captured stdout.
fn run(source: &str) -> Result<String, GlamError> {
    let tokens = lexer::lex(source)?;
    let program = parser::parse(tokens)?;
    let mut interp = Interpreter::new(BufferIo::default());
    interp.run(&program)?;
    Ok(interp.into_io().output)
}

/// Same as `run`, but feeds canned answers to any `input()` calls.
fn run_with_inputs(source: &str, inputs: Vec<&str>) -> Result<String, GlamError> {
    let tokens = lexer::lex(source)?;
    let program = parser::parse(tokens)?;
    let mut interp = Interpreter::new(BufferIo::with_inputs(inputs));
    interp.run(&program)?;
    Ok(interp.into_io().output)
}

// -- §8 end-to-end scenarios -------------------------------------------

#[test]
fn scenario_1_arithmetic_precedence() {
    let out = run("int x = 2; int y = 3; print(x + y * 4);").unwrap();
    assert_eq!(out, "14\n");
}

#[test]
fn scenario_2_for_loop_accumulator() {
    let out = run("int s = 0; for (int i=1; i<=5; i=i+1) { s = s + i; } print(s);").unwrap();
    assert_eq!(out, "15\n");
}

#[test]
fn scenario_3_instance_field_mutation_via_method() {
    let out = run(
        "class P { int x = 1; bump() { this.x = this.x + 2; } }
         P p = new P(); p.bump(); p.bump(); print(p.x);",
    )
    .unwrap();
    assert_eq!(out, "5\n");
}

#[test]
fn scenario_4_inheritance_overrides_method() {
    let out = run(
        "class A { hi() { print(\"A\"); } }
         class B extends A { hi() { print(\"B\"); } }
         B b = new B(); b.hi();",
    )
    .unwrap();
    assert_eq!(out, "B\n");
}

#[test]
fn scenario_5_division_by_zero_is_catchable() {
    let out = run("try { int n = 10 / 0; } catch (e) { print(\"caught\"); }").unwrap();
    assert_eq!(out, "caught\n");
}

#[test]
fn scenario_6_power_is_right_associative() {
    let out = run("print(2^3^2);").unwrap();
    assert_eq!(out, "512\n");
}

// -- universal testable properties (§8) ---------------------------------

#[test]
fn for_totality_executes_body_exactly_n_times() {
    for n in 0..5 {
        let out = run(&format!(
            "int c = 0; for (int i=0; i<{n}; i=i+1) {{ c = c + 1; }} print(c);"
        ))
        .unwrap();
        assert_eq!(out, format!("{n}\n"));
    }
}

#[test]
fn string_concat_stringifies_the_other_operand() {
    let out = run("print(\"x\" + 1);").unwrap();
    assert_eq!(out, "x1\n");
}

#[test]
fn and_or_do_not_short_circuit_both_sides_evaluate() {
    // A side effect on the right-hand operand must be observed even
    // when the left-hand operand alone already determines the result.
    let out = run(
        "int calls = 0;
         fn sideEffect() { calls = calls + 1; return True; }
         bool r = False and sideEffect();
         print(calls);",
    )
    .unwrap();
    assert_eq!(out, "1\n");
}

#[test]
fn inheritance_resolution_child_method_hides_parent() {
    let hides = run(
        "class A { name() { return \"A\"; } }
         class C extends A { name() { return \"C\"; } }
         C c = new C(); print(c.name());",
    )
    .unwrap();
    assert_eq!(hides, "C\n");

    let falls_through = run(
        "class A { name() { return \"A\"; } }
         class C extends A { }
         C c = new C(); print(c.name());",
    )
    .unwrap();
    assert_eq!(falls_through, "A\n");
}

#[test]
fn private_field_rejected_outside_owning_instance() {
    let err = run(
        "class P { private int secret = 1; }
         P p = new P(); print(p.secret);",
    )
    .unwrap_err();
    assert!(matches!(err, GlamError::AccessError { .. }));
}

#[test]
fn private_field_accessible_from_own_method() {
    let out = run(
        "class P { private int secret = 42; reveal() { return this.secret; } }
         P p = new P(); print(p.reveal());",
    )
    .unwrap();
    assert_eq!(out, "42\n");
}

#[test]
fn scope_isolation_function_does_not_mutate_global() {
    let out = run(
        "int x = 1;
         fn addOne(n) { int x = n + 1; return x; }
         print(addOne(10));
         print(x);",
    )
    .unwrap();
    assert_eq!(out, "11\n1\n");
}

// -- additional feature coverage -----------------------------------------

#[test]
fn static_members_shared_across_instances() {
    let out = run(
        "class Counter {
            static int count = 0;
            bump() { Counter.count = Counter.count + 1; }
         }
         Counter a = new Counter();
         Counter b = new Counter();
         a.bump(); b.bump(); a.bump();
         print(Counter.count);",
    )
    .unwrap();
    assert_eq!(out, "3\n");
}

#[test]
fn instances_are_reference_like_aliasing() {
    let out = run(
        "class P { int x = 1; }
         P a = new P();
         P b = a;
         b.x = 9;
         print(a.x);",
    )
    .unwrap();
    assert_eq!(out, "9\n");
}

#[test]
fn field_lookup_wins_over_same_named_method() {
    // A field and a method of the same name cannot coexist on one
    // class in practice, so this pins the documented precedence using
    // inheritance: a subclass field shadowing a base-class method
    // slot name is not meaningfully expressible without a dedicated
    // conflict — exercised instead via direct field access precedence
    // on member lookup ordering (fields checked before methods).
    let out = run(
        "class P { int val = 7; val() { return 99; } }
         P p = new P();
         print(p.val);",
    )
    .unwrap();
    assert_eq!(out, "7\n");
}

#[test]
fn arrays_support_indexing_and_assignment() {
    let out = run(
        "array a = [1, 2, 3];
         a[1] = 20;
         print(a[0]);
         print(a[1]);
         print(a[2]);",
    )
    .unwrap();
    assert_eq!(out, "1\n20\n3\n");
}

#[test]
fn string_length_member() {
    let out = run("str s = \"hello\"; print(s.length);").unwrap();
    assert_eq!(out, "5\n");
}

#[test]
fn foreach_iterates_array_elements_in_order() {
    let out = run(
        "array a = [1, 2, 3];
         for (int v in a) { print(v); }",
    )
    .unwrap();
    assert_eq!(out, "1\n2\n3\n");
}

#[test]
fn while_loop_reevaluates_condition_each_iteration() {
    let out = run("int i = 0; while (i < 3) { print(i); i = i + 1; }").unwrap();
    assert_eq!(out, "0\n1\n2\n");
}

#[test]
fn if_elseif_else_chain_picks_first_true_branch() {
    let out = run(
        "int x = 2;
         if (x == 1) { print(\"one\"); }
         elseif (x == 2) { print(\"two\"); }
         else { print(\"other\"); }",
    )
    .unwrap();
    assert_eq!(out, "two\n");
}

#[test]
fn try_catch_return_is_not_caught() {
    // A `Return` raised inside a try-block must not be trapped by the
    // enclosing catch; it must propagate out of the function call.
    let out = run(
        "fn f() {
            try { return 1; } catch (e) { return 2; }
            return 3;
         }
         print(f());",
    )
    .unwrap();
    assert_eq!(out, "1\n");
}

#[test]
fn constructor_runs_on_instantiation() {
    let out = run(
        "class P {
            int x;
            constructor(v) { this.x = v; }
         }
         P p = new P(5);
         print(p.x);",
    )
    .unwrap();
    assert_eq!(out, "5\n");
}

#[test]
fn int_declaration_coerces_numeric_string_input() {
    let out = run_with_inputs("int n = input(\"n? \"); print(n + 1);", vec!["41"]).unwrap();
    assert_eq!(out, "42\n");
}

#[test]
fn int_declaration_rejects_non_numeric_input() {
    let err = run_with_inputs("int n = input(\"n? \");", vec!["not-a-number"]).unwrap_err();
    assert!(matches!(err, GlamError::ConversionError { .. }));
}

#[test]
fn multiple_names_share_one_initializer_on_the_last() {
    let out = run("int a, b, c = 7; print(a); print(b); print(c);").unwrap();
    assert_eq!(out, "0\n0\n7\n");
}

#[test]
fn integer_arithmetic_stays_integer_division_promotes() {
    let out = run("print(7 / 2); print(6 / 2);").unwrap();
    assert_eq!(out, "3.5\n3\n");
}

#[test]
fn uncaught_name_error_surfaces_from_run() {
    let err = run("print(doesNotExist);").unwrap_err();
    assert!(matches!(err, GlamError::NameError { .. }));
}

#[test]
fn array_index_out_of_range_is_index_error() {
    let err = run("array a = [1, 2]; print(a[5]);").unwrap_err();
    assert!(matches!(err, GlamError::IndexError { .. }));
}
