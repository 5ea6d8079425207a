mod common;
use common::*;
use sigil::ErrorKind;

#[test]
fn test_print_has_no_terminator() {
    let output = run(r#"
        #main{
            @print : ("a" , "b");
            @print : ("c");
        }
    "#);
    assert_eq!(output, "abc");
}

#[test]
fn test_print_token_kinds() {
    let output = run(r#"
        #main{
            @new_i32 : (n , 7);
            @print : ("quoted " , $n , " " , 42);
        }
    "#);
    assert_eq!(output, "quoted 7 42");
}

#[test]
fn test_println_terminates_every_token() {
    let output = run(r#"
        #main{
            @println : ("a" , "b");
        }
    "#);
    assert_eq!(output, "a\nb\n");
}

#[test]
fn test_input_stores_the_line() {
    let output = run_with_input(
        r#"
        #main{
            @new_str : (name , "");
            @input : ("Name: ") ~ name;
            @print : ("hello " , $name);
        }
        "#,
        "Ada\n",
    );
    assert_eq!(output, "Name: hello Ada");
}

#[test]
fn test_input_without_return_address_discards() {
    let output = run_with_input(
        r#"
        #main{
            @input : ();
            @print : ("done");
        }
        "#,
        "ignored\n",
    );
    assert_eq!(output, "done");
}

#[test]
fn test_input_prompt_from_reference() {
    let output = run_with_input(
        r#"
        #main{
            @new_str : (prompt , "n? ");
            @new_str : (buff , "");
            @input : ($prompt) ~ buff;
            @print : ($buff);
        }
        "#,
        "5\n",
    );
    assert_eq!(output, "n? 5");
}

#[test]
fn test_flush_rejects_parameters() {
    let error = fail("#main{ @flush : (x); }");
    assert_eq!(error.kind(), ErrorKind::Parse);
}

#[test]
fn test_flush() {
    let output = run(r#"
        #main{
            @print : ("x");
            @flush : ();
        }
    "#);
    assert_eq!(output, "x");
}

#[test]
fn test_input_rejects_two_prompts() {
    let error = fail("#main{ @input : (\"a\" , \"b\"); }");
    assert_eq!(error.kind(), ErrorKind::Parse);
}
