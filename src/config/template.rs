/// Generate a commented `_redirects` template for `--init`.
pub fn generate_init_template() -> String {
	r#"# _redirects
#
# One rule per line:
#
#   from [key=value ...] to [status[!]]
#
# - `:name` matches one path segment and can be reused in the destination.
# - A trailing `*` matches the rest of the path; use `:splat` in the destination.
# - The status defaults to 301. A 3xx status redirects the client, anything
#   else (usually 200) serves the destination in place.
# - A `!` after the status discards every other candidate for the path.
# - The first matching rule wins.

# /blog/:year/:slug  /posts/:slug       301
# /docs/*            https://docs.example.com/:splat  302
# /app/*             /app/index.html    200
"#
	.to_string()
}
