mod common;
use common::*;
use sigil::ErrorKind;

#[test]
fn test_sum_is_variadic() {
    let output = run(r#"
        #main{
            @new_i32 : (total , 0);
            @sum : (1 , 2 , 3 , 4) ~ total;
            @print : ($total);
        }
    "#);
    assert_eq!(output, "10");
}

#[test]
fn test_add_alias() {
    let output = run(r#"
        #main{
            @new_i32 : (total , 0);
            @add : (40 , 2) ~ total;
            @print : ($total);
        }
    "#);
    assert_eq!(output, "42");
}

#[test]
fn test_product_and_multiply() {
    let output = run(r#"
        #main{
            @new_i32 : (p , 0);
            @product : (2 , 3 , 4) ~ p;
            @multiply : ($p , 2) ~ p;
            @print : ($p);
        }
    "#);
    assert_eq!(output, "48");
}

#[test]
fn test_subtract_and_divide() {
    let output = run(r#"
        #main{
            @new_f64 : (r , 0.0);
            @subtract : (10 , 3) ~ r;
            @print : ($r , " ");
            @divide : ($r , 2) ~ r;
            @print : ($r);
        }
    "#);
    assert_eq!(output, "7.000000 3.500000");
}

#[test]
fn test_mod() {
    let output = run(r#"
        #main{
            @new_i64 : (r , 0);
            @mod : (7 , 3) ~ r;
            @print : ($r);
        }
    "#);
    assert_eq!(output, "1");
}

#[test]
fn test_mod_truncates_float_operands() {
    let output = run(r#"
        #main{
            @new_i64 : (r , 0);
            @mod : (7.9 , 3.9) ~ r;
            @print : ($r);
        }
    "#);
    assert_eq!(output, "1");
}

#[test]
fn test_floor_ceiling_abs_pow() {
    let output = run(r#"
        #main{
            @new_i32 : (r , 0);
            @floor : (3.7) ~ r;
            @print : ($r , " ");
            @ceiling : (3.2) ~ r;
            @print : ($r , " ");
            @abs : (-5) ~ r;
            @print : ($r , " ");
            @pow : (2 , 10) ~ r;
            @print : ($r);
        }
    "#);
    assert_eq!(output, "3 4 5 1024");
}

#[test]
fn test_result_narrows_to_return_tag() {
    let output = run(r#"
        #main{
            @new_i8 : (r , 0);
            @sum : (100 , 27) ~ r;
            @print : ($r);
        }
    "#);
    assert_eq!(output, "127");
}

#[test]
fn test_store_overflow() {
    let error = fail(r#"
        #main{
            @new_i8 : (r , 0);
            @sum : (100 , 100) ~ r;
        }
    "#);
    assert_eq!(error.kind(), ErrorKind::Overflow);
}

#[test]
fn test_non_numeric_return_address() {
    let error = fail(r#"
        #main{
            @new_str : (r , "zero");
            @sum : (1 , 2) ~ r;
        }
    "#);
    assert_eq!(error.kind(), ErrorKind::TypeMismatch);
}

#[test]
fn test_missing_return_address() {
    let error = fail("#main{ @sum : (1 , 2); }");
    assert_eq!(error.kind(), ErrorKind::UnknownReturnAddress);
}

#[test]
fn test_fmax_keeps_the_accumulator() {
    let output = run(r#"
        #main{
            @new_fmax : (r , 0);
            @divide : (1 , 3) ~ r;
            @print : ($r);
        }
    "#);
    assert_eq!(output, "0.333333");
}

#[test]
fn test_textual_pipeline_keeps_six_digit_precision() {
    let output = run(r#"
        #main{
            @new_f32 : (r , 0.1);
            @sum : ($r , 0.2) ~ r;
            @print : ($r);
        }
    "#);
    assert_eq!(output, "0.300000");
}

#[test]
fn test_bad_operand() {
    let error = fail(r#"
        #main{
            @new_i32 : (r , 0);
            @sum : (1 , oops) ~ r;
        }
    "#);
    assert_eq!(error.kind(), ErrorKind::BadLiteral);
}
