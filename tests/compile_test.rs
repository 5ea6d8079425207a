use sigil::{compile, ErrorKind};

#[test]
fn test_section_extraction() {
    let program = compile(
        r#"
        #main {
            @new_i32 : (x , 1) ;
            @print : ($x) ;
        }
        #helper_section {
            @flush : () ;
        }
        "#,
    )
    .unwrap();
    assert_eq!(program.section("main").unwrap().len(), 2);
    assert_eq!(program.section("helper_section").unwrap().len(), 1);
    assert!(!program.contains("missing"));
}

#[test]
fn test_instruction_fields() {
    let program = compile("#main{ <!$flag> @sum : ($a , 1) ~ a; }").unwrap();
    let ins = &program.section("main").unwrap()[0];
    assert_eq!(ins.guard, "!$flag");
    assert_eq!(ins.op, "sum");
    assert_eq!(ins.params, vec!["$a", "1"]);
    assert_eq!(ins.ret, "a");
}

#[test]
fn test_defaults() {
    let program = compile("#main{ @flush : (); }").unwrap();
    let ins = &program.section("main").unwrap()[0];
    assert_eq!(ins.guard, "true");
    assert_eq!(ins.ret, "nullptr");
}

#[test]
fn test_whitespace_outside_quotes_is_free() {
    let tight = compile("#main{@print:(\"a b\",$x)~nullptr;}").unwrap();
    let spaced = compile("#main  {  @print  :  ( \"a b\" ,  $x )  ~  nullptr  ;  }").unwrap();
    assert_eq!(tight.section("main").unwrap(), spaced.section("main").unwrap());
}

#[test]
fn test_quoted_text_is_preserved() {
    let program = compile("#main{ @print : (\"The temp in f is: \"); }").unwrap();
    let ins = &program.section("main").unwrap()[0];
    assert_eq!(ins.params, vec!["\"The temp in f is: \""]);
}

#[test]
fn test_bracket_param_keeps_commas() {
    let program = compile("#main{ @new_list : (L , dynamic , [1, 2, 3]); }").unwrap();
    let ins = &program.section("main").unwrap()[0];
    assert_eq!(ins.params[2], "[1,2,3]");
}

#[test]
fn test_missing_brace() {
    let error = compile("#main{ @flush : ();").unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Parse);
}

#[test]
fn test_unterminated_quote() {
    let error = compile("#main{ @print : (\"oops); }").unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Parse);
}

#[test]
fn test_unterminated_statement_is_dropped() {
    let program = compile("#main{ @flush : (); @print : ($x) }").unwrap();
    assert_eq!(program.section("main").unwrap().len(), 1);
}
