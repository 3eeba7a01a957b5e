use std::fs;

use pretty_assertions::assert_eq;
use tessera::{
    error::{Error, ParseError, RuntimeError},
    interpreter::{
        environment::Environment,
        evaluator::core::{Context, DEFAULT_MAX_CALL_DEPTH},
        value::{core::Value, function::NativeFunction},
    },
    run, run_in,
};
use walkdir::WalkDir;

#[test]
fn book_examples_work() {
    let mut count = 0;

    for entry in
        WalkDir::new("book/src").into_iter()
                                .filter_map(Result::ok)
                                .filter(|e| e.path().extension().is_some_and(|ext| ext == "md"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        for (i, code) in extract_tessera_blocks(&content).into_iter().enumerate() {
            count += 1;
            if let Err(e) = run(&code) {
                panic!("Example {} in {:?} failed:\n{}\nError: {:?}", i + 1, path, code, e);
            }
        }
    }

    assert!(count > 0, "No tessera examples found in book/src");
}

fn extract_tessera_blocks(content: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut inside = false;
    let mut buf = String::new();

    for line in content.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```tessera") {
            inside = true;
            buf.clear();
            continue;
        }
        if inside && trimmed.starts_with("```") {
            inside = false;
            blocks.push(buf.clone());
            continue;
        }
        if inside {
            buf.push_str(line);
            buf.push('\n');
        }
    }

    blocks
}

fn assert_success(src: &str) {
    if let Err(e) = run(src) {
        panic!("Script failed: {e}");
    }
}

fn assert_failure(src: &str) {
    assert!(run(src).is_err(), "Script succeeded but was expected to fail");
}

fn value_of(src: &str) -> Value {
    run(src).unwrap_or_else(|e| panic!("Script failed: {e}"))
}

fn runtime_error(src: &str) -> RuntimeError {
    match run(src) {
        Err(Error::Runtime(e)) => e,
        other => panic!("expected a runtime error, got {other:?}"),
    }
}

#[test]
fn test_script_file() {
    let script = fs::read_to_string("tests/example.tes").expect("missing file");
    assert_success(&script);
}

#[test]
fn while_loop_end_to_end() {
    assert_eq!(value_of("let x = 1; while (x < 4) { x = x + 1; } x;"), Value::Number(4.0));
}

#[test]
fn class_constructor_end_to_end() {
    assert_eq!(value_of("class C { v; constructor(a) { this.v = a; } } new C(5).v;"),
               Value::Number(5.0));
}

#[test]
fn enum_match_end_to_end() {
    assert_eq!(value_of("enum E { A, B } match E.A { E.A => { \"got A\" } default => { \"other\" } }"),
               Value::from("got A"));
}

#[test]
fn arithmetic_and_concatenation() {
    assert_success("assert(1 + 2 * 3 == 7)");
    assert_success("assert((1 + 2) * 3 == 9)");
    assert_success("assert(7 % 4 == 3)");
    assert_success("assert(10 / 4 == 2.5)");
    assert_success("assert(0 - 3 < 0)");
    assert_success("assert(\"n = \" + 3 == \"n = 3\")");
    assert_success("assert(1 + \"a\" == \"1a\")");
    assert_success("assert('single' == \"single\")");
}

#[test]
fn division_and_modulo_by_zero_fail() {
    assert!(matches!(runtime_error("1 / 0"), RuntimeError::DivisionByZero { line: 1 }));
    assert!(matches!(runtime_error("\n5 % 0"), RuntimeError::DivisionByZero { line: 2 }));
}

#[test]
fn mismatched_operands_yield_false() {
    assert_eq!(value_of("1 - \"a\""), Value::Bool(false));
    assert_eq!(value_of("true && 1"), Value::Bool(false));
    assert_eq!(value_of("1 && true"), Value::Bool(false));
    assert_eq!(value_of("\"yes\" | true"), Value::Bool(false));
    assert_eq!(value_of("null < 1"), Value::Bool(false));
    assert_eq!(value_of("[1] * 2"), Value::Bool(false));
    assert_eq!(value_of("\"a\" + null"), Value::from("anull"));
}

#[test]
fn only_true_satisfies_a_condition() {
    assert_eq!(value_of("let r = 0; if (1) { r = 1 } else { r = 2 } r"), Value::Number(2.0));
    assert_eq!(value_of("let r = 0; if (\"yes\") { r = 1 } r"), Value::Number(0.0));
    assert_eq!(value_of("if (1 < 2) { \"then\" } else { \"else\" }"), Value::from("then"));
}

#[test]
fn structural_equality() {
    assert_success("assert([1, 2] == [1, 2])");
    assert_success("assert([1, 2] != [1, 3])");
    assert_success("assert({} == {})");
    assert_success("assert({ a: [1, { b: 2 }] } == { a: [1, { b: 2 }] })");
    assert_success("assert({ a: 1, b: 2 } == { b: 2, a: 1 })");
    assert_success("assert(null == null)");
    assert_success("assert(1 != \"1\")");
    assert_success("fn f() { 1 } let g = f; assert(f == g)");
    assert_success("assert(fn () { 1 } != fn () { 1 })");
}

#[test]
fn logical_operators_do_not_short_circuit() {
    let src = "
        let calls = 0
        fn touch() { calls = calls + 1; true }
        false && touch()
        true | touch()
        calls
    ";
    assert_eq!(value_of(src), Value::Number(2.0));
}

#[test]
fn logical_chains() {
    assert_success("assert(true && true)");
    assert_success("assert(false | true)");
    assert_success("assert((false && true) == false)");
    assert_success("assert(1 < 2 && 2 < 3 && 3 < 4)");
    assert_success("let a = false && true | true && true\nassert(a)");
}

#[test]
fn ternary_sugar_picks_a_branch() {
    assert_eq!(value_of("let x = 3; x > 1 -> \"big\" | \"small\""), Value::from("big"));
    assert_eq!(value_of("let x = 0; x > 1 -> \"big\" | \"small\""), Value::from("small"));
}

#[test]
fn variables_and_constants() {
    assert_success("let x\nassert(x == null)");
    assert_success("let x = 1\nlet x = 2\nassert(x == 2)");
    assert!(matches!(runtime_error("const k = 1\nk = 2"),
                     RuntimeError::ConstantReassignment { line: 2, .. }));
    assert!(matches!(runtime_error("y = 1"), RuntimeError::UnknownVariable { .. }));
    assert!(matches!(run("const k"), Err(Error::Parse(ParseError::ConstantWithoutValue { .. }))));
}

#[test]
fn assignment_yields_the_assigned_value() {
    assert_success("let a = 0\nlet b = a = 5\nassert(a == 5 && b == 5)");
}

#[test]
fn blocks_scope_their_declarations() {
    assert_failure("if (true) { let inner = 1 } inner");
    assert_success("let x = 1\nif (true) { let x = 2 }\nassert(x == 1)");
    assert_success("let x = 1\nif (true) { x = 2 }\nassert(x == 2)");
}

#[test]
fn for_loop_runs_update_after_continue() {
    let src = "
        let seen = []
        for (let i = 0; i < 5; i = i + 1) {
            if (i == 2) { continue }
            if (i == 4) { break }
            push(seen, i)
        }
        seen
    ";
    assert_eq!(value_of(src), Value::from(vec![Value::Number(0.0),
                                               Value::Number(1.0),
                                               Value::Number(3.0)]));
}

#[test]
fn for_loop_variable_stays_inside_the_loop() {
    assert_failure("for (let i = 0 i < 2 i = i + 1) { } i");
    assert_eq!(value_of("for (let i = 0 i < 2 i = i + 1) { i }"), Value::Null);
}

#[test]
fn false_initial_test_skips_the_body() {
    assert_eq!(value_of("let ran = false; while (false) { ran = true } ran"), Value::Bool(false));
    assert_eq!(value_of("let ran = false; for (let i = 5 i < 0 i = i + 1) { ran = true } ran"),
               Value::Bool(false));
}

#[test]
fn while_yields_its_last_iteration() {
    assert_eq!(value_of("let i = 0; while (i < 3) { i = i + 1; i * 10 }"), Value::Number(30.0));
}

#[test]
fn break_and_continue_need_a_loop() {
    assert!(matches!(runtime_error("break"),
                     RuntimeError::LoopControlOutsideLoop { keyword: "break", .. }));
    assert!(matches!(runtime_error("if (true) { continue }"),
                     RuntimeError::LoopControlOutsideLoop { keyword: "continue", .. }));
    assert!(matches!(runtime_error("fn f() { break }\nwhile (true) { f() }"),
                     RuntimeError::LoopControlOutsideLoop { line: 1, .. }));
}

#[test]
fn break_leaves_only_the_innermost_loop() {
    let src = "
        let count = 0
        for (let i = 0 i < 3 i = i + 1) {
            while (true) { break }
            count = count + 1
        }
        count
    ";
    assert_eq!(value_of(src), Value::Number(3.0));
}

#[test]
fn return_escapes_nested_blocks_and_loops() {
    let src = "
        fn find(items, wanted) {
            for (let i = 0 i < len(items) i = i + 1) {
                if (items[i] == wanted) { return i }
            }
            return 0 - 1
        }
        [find([4, 5, 6], 6), find([4, 5, 6], 7)]
    ";
    assert_eq!(value_of(src), Value::from(vec![Value::Number(2.0), Value::Number(-1.0)]));
}

#[test]
fn function_result_is_the_last_statement_without_return() {
    assert_success("fn f(a) { a * 2 }\nassert(f(4) == 8)");
    assert_success("fn f() { return }\nassert(f() == null)");
    assert_success("fn f() { }\nassert(f() == null)");
}

#[test]
fn arguments_bind_positionally() {
    assert_success("fn f(a, b) { a }\nassert(f(1, 2, 3) == 1)");
    assert_success("fn f(a, b) { a }\nassert(f(1) == 1)");
    assert!(matches!(runtime_error("fn f(a, b) { b }\nf(1)"),
                     RuntimeError::UnknownVariable { ref name, .. } if name == "b"));
}

#[test]
fn closures_capture_their_declaration_scope() {
    let src = "
        fn counter() {
            let count = 0
            return fn () { count = count + 1 }
        }
        let a = counter()
        let b = counter()
        a(); a()
        let results = [a(), b()]
        results
    ";
    assert_eq!(value_of(src), Value::from(vec![Value::Number(3.0), Value::Number(1.0)]));
}

#[test]
fn functions_resolve_names_where_declared() {
    let src = "
        let x = \"outer\"
        fn show() { x }
        fn call_with_local() { let x = \"local\"; show() }
        call_with_local()
    ";
    assert_eq!(value_of(src), Value::from("outer"));
}

#[test]
fn recursion_works() {
    assert_success("fn fib(n) { if (n < 2) { return n } fib(n - 1) + fib(n - 2) }\nassert(fib(10) == 55)");
}

#[test]
fn runaway_recursion_is_an_error() {
    let env = Environment::global();
    let mut context = Context::with_max_depth(32);

    let result = run_in("fn down(n) { down(n + 1) }\ndown(0)", &env, &mut context);

    assert!(matches!(result, Err(Error::Runtime(RuntimeError::RecursionLimit { limit: 32, .. }))));
    assert_eq!(context.depth(), 0);
}

#[test]
fn default_depth_limit_stops_runaway_recursion() {
    assert!(matches!(runtime_error("fn down(n) { down(n + 1) }\ndown(0)"),
                     RuntimeError::RecursionLimit { limit: DEFAULT_MAX_CALL_DEPTH, line: 1 }));
}

#[test]
fn recursion_just_under_the_default_limit_succeeds() {
    let src = "fn down(n) { if (n == 0) { return 0 } down(n - 1) }\ndown(250)";
    assert_eq!(value_of(src), Value::Number(0.0));
}

#[test]
fn named_function_expressions_bind_their_name() {
    assert_success("let f = fn g() { 1 }\nassert(g() == 1)\nassert(f == g)");
    assert_success("fn outer() { return fn inner() { 2 } }\nlet h = outer()\nassert(h() == 2)");
    assert!(matches!(runtime_error("let f = fn g() { 1 }\ng = 2"),
                     RuntimeError::ConstantReassignment { ref name, line: 2 } if name == "g"));
}

#[test]
fn function_declarations_are_constant() {
    assert!(matches!(runtime_error("fn f() { 1 }\nf = 2"),
                     RuntimeError::ConstantReassignment { ref name, line: 2 } if name == "f"));
    assert_success("fn f() { 1 }\nlet f = 2\nassert(f == 2)");
}

#[test]
fn calling_a_non_function_fails() {
    assert!(matches!(runtime_error("let x = 1\nx()"),
                     RuntimeError::NotCallable { found: "number", line: 2 }));
}

#[test]
fn arrays_share_by_reference() {
    assert_success("let a = [1, 2]\nlet b = a\npush(b, 3)\nassert(len(a) == 3)");
    assert_success("let a = [1]\nlet b = a\nb[0] = 9\nassert(a[0] == 9)");
    assert_success("fn fill(xs) { xs[0] = 1 }\nlet a = [0]\nfill(a)\nassert(a == [1])");
}

#[test]
fn array_writes_past_the_end_pad_with_null() {
    assert_success("let a = [1]\na[3] = 4\nassert(len(a) == 4 && a[1] == null)");
}

#[test]
fn array_growth_is_capped() {
    assert!(matches!(runtime_error("let a = []\na[9007199254740991] = 1"),
                     RuntimeError::IndexOutOfBounds { index: 9_007_199_254_740_991,
                                                      len: 0,
                                                      line: 2 }));
    assert_success("let a = [1]\nlet r = try { a[16777216] = 1 } catch { \"too far\" }\n\
                    assert(r == \"too far\")\nassert(len(a) == 1)");
    assert_success("let a = []\na[99] = 1\nassert(len(a) == 100)");
}

#[test]
fn indexing_errors() {
    assert!(matches!(runtime_error("[1, 2][2]"),
                     RuntimeError::IndexOutOfBounds { index: 2, len: 2, .. }));
    assert!(matches!(runtime_error("[1, 2][0.5]"), RuntimeError::InvalidIndex { .. }));
    assert!(matches!(runtime_error("[1, 2][\"a\"]"), RuntimeError::InvalidIndex { .. }));
    assert_success("assert(\"abc\"[1] == \"b\")");
}

#[test]
fn objects_read_write_and_nest() {
    assert_success("let o = { a: 1 }\no.b = 2\nassert(o.b == 2 && o[\"a\"] == 1)");
    assert_success("let o = { a: 1 }\nassert(o.missing == null)");
    assert_success("let o = { inner: { list: [1, 2] } }\no.inner.list[1] = 5\nassert(o.inner.list == [1, 5])");
    assert_success("let a = 1\nlet o = { a }\nassert(o.a == 1)");
    assert_success("let o = { a: 1 }\nlet p = o\np.a = 2\nassert(o.a == 2)");
}

#[test]
fn members_of_plain_values_fail() {
    assert!(matches!(runtime_error("let n = 1\nn.x"), RuntimeError::TypeError { line: 2, .. }));
    assert!(matches!(runtime_error("null.x = 1"), RuntimeError::TypeError { .. }));
}

#[test]
fn instances_start_with_null_fields() {
    assert_success("class P { x; y }\nlet p = new P()\nassert(p.x == null && p.y == null)");
}

#[test]
fn constructor_receives_arguments_in_order() {
    let src = "
        class Pair {
            first; second
            constructor(a, b) { this.first = a; this.second = b; 99 }
        }
        let p = new Pair(1, 2)
        let fields = [p.first, p.second]
        fields
    ";
    assert_eq!(value_of(src), Value::from(vec![Value::Number(1.0), Value::Number(2.0)]));
}

#[test]
fn methods_bind_this_to_their_instance() {
    let src = "
        class Counter {
            count
            constructor() { this.count = 0 }
            bump() { this.count = this.count + 1; this }
            get() { this.count }
        }
        let a = new Counter()
        let b = new Counter()
        a.bump().bump()
        b.bump()
        let get = a.get
        let counts = [get(), b.get()]
        counts
    ";
    assert_eq!(value_of(src), Value::from(vec![Value::Number(2.0), Value::Number(1.0)]));
}

#[test]
fn instance_fields_are_fixed_at_construction() {
    assert!(matches!(runtime_error("class P { x }\nlet p = new P()\np.y = 1"),
                     RuntimeError::UnknownMember { line: 3, .. }));
    assert!(matches!(runtime_error("class P { x }\nnew P().nope"),
                     RuntimeError::UnknownMember { .. }));
}

#[test]
fn static_members_live_on_the_class() {
    let src = "
        class Registry {
            static count = 0
            static register() { Registry.count = Registry.count + 1 }
            static total() { this.count }
        }
        Registry.register()
        Registry.register()
        Registry.total()
    ";
    assert_eq!(value_of(src), Value::Number(2.0));
    assert_success("class C { }\nC.added = 5\nassert(C.added == 5)");
}

#[test]
fn new_needs_a_class() {
    assert!(matches!(runtime_error("let f = 1\nnew f()"),
                     RuntimeError::NotAClass { found: "number", line: 2 }));
}

#[test]
fn instance_equality_is_by_class_and_fields() {
    assert_success("class P { x }\nassert(new P() == new P())");
    assert_success("class P { x }\nclass Q { x }\nassert(new P() != new Q())");
    assert_success("class P { x constructor(v) { this.x = v } }\nassert(new P(1) != new P(2))");
}

#[test]
fn enum_members_compare_by_declaration_and_name() {
    assert_success("enum E { A, B }\nassert(E.A == E.A && E.A != E.B)");
    assert_success("enum E { A }\nenum F { A }\nassert(E.A != F.A)");
    assert!(matches!(runtime_error("enum E { A }\nE.Z"), RuntimeError::UnknownMember { .. }));
}

#[test]
fn tagging_produces_independent_values() {
    let src = "
        enum Shape { Circle, Square }
        let a = Shape.Circle(1)
        let b = Shape.Circle(2)
        assert(a != b)
        assert(a == Shape.Circle(1))
        assert(Shape.Circle == Shape.Circle)
        assert(a != Shape.Circle)
    ";
    assert_success(src);
}

#[test]
fn tagging_takes_exactly_one_argument() {
    assert!(matches!(runtime_error("enum E { A }\nE.A()"),
                     RuntimeError::TagArity { count: 0, .. }));
    assert!(matches!(runtime_error("enum E { A }\nE.A(1, 2)"),
                     RuntimeError::TagArity { count: 2, .. }));
}

#[test]
fn match_binds_tagged_payloads() {
    let src = "
        enum Shape { Circle, Square }
        fn area(shape) {
            match shape {
                Shape.Circle(r) => { 3 * r * r }
                Shape.Square(side) => { side * side }
            }
        }
        [area(Shape.Circle(2)), area(Shape.Square(3))]
    ";
    assert_eq!(value_of(src), Value::from(vec![Value::Number(12.0), Value::Number(9.0)]));
}

#[test]
fn untagged_scrutinee_skips_destructuring_arms() {
    let src = "
        enum E { A }
        match E.A { E.A(x) => { \"tagged\" } default => { \"untagged\" } }
    ";
    assert_eq!(value_of(src), Value::from("untagged"));
}

#[test]
fn first_matching_arm_runs_once() {
    let src = "
        let runs = 0
        let r = match 2 {
            1, 2 => { runs = runs + 1; \"first\" }
            2 => { runs = runs + 10; \"second\" }
        }
        let outcome = [r, runs]
        outcome
    ";
    assert_eq!(value_of(src), Value::from(vec![Value::from("first"), Value::Number(1.0)]));
}

#[test]
fn unmatched_match_without_default_is_null() {
    assert_eq!(value_of("match 5 { 1 => { \"one\" } }"), Value::Null);
    assert_eq!(value_of("match 5 { 1 => { \"one\" } default => { \"many\" } }"),
               Value::from("many"));
}

#[test]
fn call_patterns_evaluate_their_callee_once() {
    let src = "
        let made = 0
        fn maker() {
            made = made + 1
            return fn (x) { x * 2 }
        }
        let v = 4
        let r = match 8 { maker()(v) => { \"eight\" } }
        assert(r == \"eight\")
        assert(made == 1)
    ";
    assert_success(src);
}

#[test]
fn match_compares_structurally() {
    assert_eq!(value_of("match [1, { a: 2 }] { [1, { a: 2 }] => { \"same\" } }"),
               Value::from("same"));
}

#[test]
fn default_mixed_with_patterns_acts_as_both() {
    assert_eq!(value_of("match 1 { 1, default => { \"hit\" } 2 => { \"two\" } }"),
               Value::from("hit"));
    assert_eq!(value_of("match 9 { 1, default => { \"hit\" } 2 => { \"two\" } }"),
               Value::from("hit"));
}

#[test]
fn match_arm_bindings_stay_in_the_arm() {
    assert_failure("enum E { A }\nmatch E.A(1) { E.A(v) => { v } }\nv");
}

#[test]
fn thrown_values_are_caught_as_error() {
    assert_eq!(value_of("try { throw 42 } catch { error }"), Value::Number(42.0));
    assert_eq!(value_of("try { throw { code: 7 } } catch { error.code }"), Value::Number(7.0));
    assert_eq!(value_of("try { 1 } catch { 2 }"), Value::Number(1.0));
}

#[test]
fn caught_error_is_visible_after_the_catch() {
    assert_success("try { throw \"boom\" } catch { }\nassert(error == \"boom\")");
}

#[test]
fn runtime_failures_are_catchable() {
    assert_success("let r = try { 1 / 0 } catch { \"caught\" }\nassert(r == \"caught\")");
    assert_success("const k = 1\ntry { k = 2 } catch { assert(typeof(error) == \"string\") }");
    assert_success("try { len(1) } catch { assert(typeof(error) == \"string\") }");
    assert_success("try { missing } catch { }\nassert(typeof(error) == \"string\")");
}

#[test]
fn errors_cross_function_boundaries_into_try() {
    let src = "
        fn fail() { throw \"deep\" }
        fn middle() { fail(); \"unreachable\" }
        try { middle() } catch { error }
    ";
    assert_eq!(value_of(src), Value::from("deep"));
}

#[test]
fn return_inside_try_is_not_an_error() {
    let src = "
        fn f() {
            try { return \"from try\" } catch { return \"from catch\" }
            \"after\"
        }
        f()
    ";
    assert_eq!(value_of(src), Value::from("from try"));
    assert_eq!(value_of("fn g() { try { throw 1 } catch { return error + 1 } 0 }\ng()"),
               Value::Number(2.0));
}

#[test]
fn uncaught_throw_reaches_the_host() {
    let err = runtime_error("\n\nthrow \"oops\"");

    assert!(matches!(err, RuntimeError::Thrown { line: 3, .. }));
    assert_eq!(err.to_string(), "Error on line 3: Uncaught exception: oops.");
}

#[test]
fn top_level_return_stops_the_program() {
    assert_eq!(value_of("let x = 1\nreturn x + 1\nx = 100"), Value::Number(2.0));
}

#[test]
fn prelude_natives() {
    assert_success("assert(len([1, 2, 3]) == 3)");
    assert_success("assert(len(\"héllo\") == 5)");
    assert_success("assert(len({ a: 1 }) == 1)");
    assert_success("assert(typeof(1) == \"number\" && typeof(\"s\") == \"string\")");
    assert_success("assert(typeof(null) == \"null\" && typeof([]) == \"array\")");
    assert_success("assert(typeof(print) == \"native-function\")");
    assert_success("assert(str([1, \"a\"]) == '[1, \"a\"]')");
    assert_success("assert(str({ a: 1 }) == \"{ a: 1 }\")");
    assert_success("assert(print(\"hello\", 1) == null)");
    assert_failure("assert(false)");
    assert_failure("len()");
    assert_failure("push(1, 2)");
}

#[test]
fn host_natives_follow_the_calling_contract() {
    let env = Environment::global();
    let native = NativeFunction::new("sum", |args, _env| {
                     let mut total = 0.0;
                     for arg in args {
                         match arg {
                             Value::Number(n) => total += n,
                             _ => return Err(RuntimeError::native("sum", "expected numbers")),
                         }
                     }
                     Ok(Value::Number(total))
                 });
    env.declare("sum", Value::NativeFunction(native), true);
    let mut context = Context::new();

    assert_eq!(run_in("sum(1, 2, 3)", &env, &mut context).unwrap(), Value::Number(6.0));
    assert_eq!(run_in("try { sum(1, \"x\") } catch { error }", &env, &mut context).unwrap(),
               Value::from("Native function 'sum' failed: expected numbers."));
}

#[test]
fn state_persists_across_run_in_calls() {
    let env = Environment::global();
    let mut context = Context::new();

    run_in("let total = 1", &env, &mut context).unwrap();
    run_in("total = total + 1", &env, &mut context).unwrap();

    assert_eq!(run_in("total", &env, &mut context).unwrap(), Value::Number(2.0));
}

#[test]
fn self_containing_values_display_and_compare() {
    assert_success("let a = [1]\npush(a, a)\nassert(str(a) == \"[1, [...]]\")");
    assert_success("let a = []\npush(a, a)\nassert(\"\" + a == \"[[...]]\")");
    assert_success("let o = { n: 1 }\no.me = o\nassert(str(o) == \"{ n: 1, me: {...} }\")");
    assert_success("class Node { next }\nlet n = new Node()\nn.next = n\n\
                    assert(str(n) == \"Node { next: {...} }\")");
    assert_success("let a = []\npush(a, a)\nlet b = []\npush(b, b)\nassert(a == b)");
    assert_success("let a = []\npush(a, a)\nlet c = [1]\npush(c, c)\nassert(a != c)");
    assert_eq!(value_of("let a = []\npush(a, a)\ntry { throw str(a) } catch { error }"),
               Value::from("[[...]]"));
}

#[test]
fn display_forms() {
    assert_eq!(value_of("3").to_string(), "3");
    assert_eq!(value_of("0.5").to_string(), "0.5");
    assert_eq!(value_of("[1, \"a\", [null]]").to_string(), "[1, \"a\", [null]]");
    assert_eq!(value_of("{}").to_string(), "{}");
    assert_eq!(value_of("class P { x }\nnew P()").to_string(), "P { x: null }");
    assert_eq!(value_of("enum E { A }\nE.A(\"p\")").to_string(), "E.A(\"p\")");
    assert_eq!(value_of("fn named() { }").to_string(), "fn named");
}
