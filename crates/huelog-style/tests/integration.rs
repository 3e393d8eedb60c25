use huelog_style::{compile_and_execute, render, Functions, State, Style, StyleError, STYLE_RESET};

#[test]
fn test_render_strips_to_plain_text() {
    let output = render("{bold}{fg 33}info{reset}: {reverse}ready{noreverse}").unwrap();
    assert_eq!(console::strip_ansi_codes(&output), "info: ready");
}

#[test]
fn test_reset_constant_clears_state() {
    let mut style = Style::compile(&format!("{{fg 4}}{{bg 5}}{}", STYLE_RESET), &Functions::new())
        .unwrap();
    let output = style.execute().unwrap();
    assert!(output.ends_with("\x1b[0m"));
    assert_eq!(style.state(), State::default());
}

#[test]
fn test_state_round_trips_through_directives() {
    let mut style = Style::compile("{fg 12}{bold}", &Functions::new()).unwrap();
    style.execute().unwrap();

    // Rendering the state's directive form reproduces the same state.
    let mut replay = Style::compile(&style.state().to_string(), &Functions::new()).unwrap();
    replay.execute().unwrap();
    assert_eq!(replay.state(), style.state());
}

#[test]
fn test_nested_fragment_compiles_in_isolation() {
    // An extension that compiles its argument as a style of its own,
    // inheriting the caller's state.
    let functions = Functions::new().register("nested", |ctx, args| {
        args.expect(1)?;
        let mut inner = Style::compile(args.str(0)?, &Functions::new()).map_err(|e| e.to_string())?;
        inner.set_state(*ctx.state());
        inner.execute().map_err(|e| e.to_string())
    });

    let output =
        compile_and_execute(r#"{bg 1}{nested "{from `>` 2}"}"#, &functions).unwrap();
    assert_eq!(
        output,
        "\x1b[48;5;1m\x1b[38;5;1m\x1b[48;5;2m>\x1b[39m"
    );
}

#[test]
fn test_extension_error_surfaces_as_execute_error() {
    let functions = Functions::new().register("nested", |_, args| {
        let inner = args.str(0)?;
        render(inner).map_err(|e| e.to_string())
    });

    let err = compile_and_execute(r#"{nested "{unknown}"}"#, &functions).unwrap_err();
    assert!(matches!(err, StyleError::Execute { ref directive, .. } if directive == "nested"));
    assert!(err.to_string().contains("not defined"));
}

#[test]
fn test_multiline_text_preserved() {
    assert_eq!(render("a\n{bold}b\nc").unwrap(), "a\n\x1b[1mb\nc");
}
