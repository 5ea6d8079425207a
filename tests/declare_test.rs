mod common;
use common::*;
use sigil::ErrorKind;

#[test]
fn test_declare_each_type() {
    let output = run(r#"
        #main{
            @new_i8 : (a , -5);
            @new_i16 : (b , 300);
            @new_i32 : (c , 70000);
            @new_i64 : (d , 5000000000);
            @new_f32 : (e , 2.5);
            @new_f64 : (f , 3.25);
            @new_fmax : (g , 0.125);
            @new_bool : (h , true);
            @new_char : (i , 'x');
            @new_str : (j , "hello");
            @println : ($a , $b , $c , $d , $e , $f , $g , $h , $i , $j);
        }
    "#);
    assert_eq!(
        output,
        "-5\n300\n70000\n5000000000\n2.500000\n3.250000\n0.125000\ntrue\nx\nhello\n"
    );
}

#[test]
fn test_duplicate_declaration() {
    let error = fail("#main{ @new_i32 : (x , 1); @new_i32 : (x , 2); }");
    assert_eq!(error.kind(), ErrorKind::DuplicateVariable);
}

#[test]
fn test_reassign_requires_existing() {
    let error = fail("#main{ @reAssign_i32 : (x , 1); }");
    assert_eq!(error.kind(), ErrorKind::UnknownVariable);
}

#[test]
fn test_reassign_may_retype() {
    let output = run(r#"
        #main{
            @new_i32 : (x , 1);
            @reAssign_str : (x , "one");
            @print : ($x);
        }
    "#);
    assert_eq!(output, "one");
}

#[test]
fn test_overflow_checks() {
    assert_eq!(fail("#main{ @new_i8 : (x , 200); }").kind(), ErrorKind::Overflow);
    assert_eq!(fail("#main{ @new_i16 : (x , 40000); }").kind(), ErrorKind::Overflow);
    assert_eq!(
        fail("#main{ @new_i32 : (x , 3000000000); }").kind(),
        ErrorKind::Overflow
    );
}

#[test]
fn test_bad_number() {
    assert_eq!(fail("#main{ @new_i32 : (x , abc); }").kind(), ErrorKind::BadLiteral);
    assert_eq!(fail("#main{ @new_f32 : (x , half); }").kind(), ErrorKind::BadLiteral);
}

#[test]
fn test_bool_literal() {
    assert_eq!(
        fail("#main{ @new_bool : (x , yes); }").kind(),
        ErrorKind::BadLiteral
    );
}

#[test]
fn test_char_escapes() {
    let output = run(r#"
        #main{
            @new_char : (tab , '\t');
            @new_char : (hex , '\x41');
            @new_char : (oct , '\102');
            @print : ("a" , $tab , $hex , $oct);
        }
    "#);
    assert_eq!(output, "a\tAB");
}

#[test]
fn test_char_from_reference_takes_first_character() {
    let output = run(r#"
        #main{
            @new_str : (word , "zebra");
            @new_char : (c , $word);
            @print : ($c);
        }
    "#);
    assert_eq!(output, "z");
}

#[test]
fn test_bad_char_literal() {
    assert_eq!(
        fail("#main{ @new_char : (c , 'ab'); }").kind(),
        ErrorKind::BadLiteral
    );
}

#[test]
fn test_str_from_reference() {
    let output = run(r#"
        #main{
            @new_i32 : (n , 42);
            @new_str : (s , $n);
            @print : ($s);
        }
    "#);
    assert_eq!(output, "42");
}

#[test]
fn test_delete_var_frees_the_name() {
    let output = run(r#"
        #main{
            @new_i32 : (x , 1);
            @delete_var : (x);
            @new_str : (x , "back");
            @print : ($x);
        }
    "#);
    assert_eq!(output, "back");
}

#[test]
fn test_delete_missing_var() {
    assert_eq!(
        fail("#main{ @delete_var : (ghost); }").kind(),
        ErrorKind::UnknownVariable
    );
}

#[test]
fn test_declare_from_reference_round_trips_text() {
    let output = run(r#"
        #main{
            @new_f32 : (a , 1.8);
            @new_f64 : (b , $a);
            @print : ($b);
        }
    "#);
    assert_eq!(output, "1.800000");
}
