#![allow(dead_code)]

use spack_recipe_rs::{Phrase, Token, group, tokenize};

pub const LICENSE: &str = "\
# Copyright 2013-2023 Lawrence Livermore National Security, LLC and other
# Spack Project Developers. See the top-level COPYRIGHT file for details.
#
# SPDX-License-Identifier: (Apache-2.0 OR MIT)
";

/// Makefile package, tab indented, multi-line class header, methods
/// after the declarations.
pub const NEXTDENOVO: &str = "\
# Copyright 2013-2023 Lawrence Livermore National Security, LLC and other
# Spack Project Developers. See the top-level COPYRIGHT file for details.
#
# SPDX-License-Identifier: (Apache-2.0 OR MIT)

from spack.package import *


class Nextdenovo(
\tMakefilePackage
\t):
\t\"\"\"NextDenovo is a string graph-based de novo assembler for long reads.

\tSupports PacBio and Nanopore data.\"\"\"

\thomepage = \"https://nextdenovo.readthedocs.io/en/latest/index.html\"
\turl = \"https://github.com/Nextomics/NextDenovo/archive/refs/tags/2.5.2.tar.gz\"

\tversion(\"2.5.2\", sha256=\"f1d07c9c362d850fd737c41e5b5be9d137b1ef3f1aec369dc73c637790611190\")

\tdepends_on(\"python\", type=\"run\")
\tdepends_on(\"py-paralleltask\", type=\"run\")
\tdepends_on(\"zlib\", type=(\"build\", \"link\", \"run\"))

\tdef edit(self, spec, prefix):
\t\tmakefile = FileFilter(\"Makefile\")
\t\tmakefile.filter(r\"^TOP_DIR.*\", \"TOP_DIR={0}\".format(self.build_directory))

\tdef install(self, spec, prefix):
\t\tinstall_tree(\"bin\", prefix.bin)";

/// CRAN package, tab indented, nothing after the declarations.
pub const ABCRF: &str = "\
# Copyright 2013-2023 Lawrence Livermore National Security, LLC and other
# Spack Project Developers. See the top-level COPYRIGHT file for details.
#
# SPDX-License-Identifier: (Apache-2.0 OR MIT)

from spack.package import *


class RAbcrf(RPackage):
\t\"\"\"Approximate Bayesian Computation via Random Forests

\tPerforms Approximate Bayesian Computation (ABC) model choice and
\tparameter inference via random forests.
\t\"\"\"

\tcran = \"abcrf\"

\tversion(\"1.9\", md5=\"506f4cc36ae9d66bd174f4b65f8c3bb2\")

\tdepends_on(\"r@3.1:\", type=(\"build\", \"run\"))
\tdepends_on(\"r-readr\", type=(\"build\", \"run\"))
\tdepends_on(\"r-mass\", type=(\"build\", \"run\"))
\tdepends_on(\"r-matrixstats\", type=(\"build\", \"run\"))
\tdepends_on(\"r-ranger\", type=(\"build\", \"run\"))";

/// Bioconductor package, four-space indented, several versions, a
/// multi-line call with a comment inside, trailing newline.
pub const ARRAYMVOUT: &str = "\
# Copyright 2013-2023 Lawrence Livermore National Security, LLC and other
# Spack Project Developers. See the top-level COPYRIGHT file for details.
#
# SPDX-License-Identifier: (Apache-2.0 OR MIT)

from spack.package import *


class RArraymvout(RPackage):
    \"\"\"multivariate outlier detection for expression array QA\"\"\"

    bioc = \"arrayMvout\"
    urls = [
        \"https://www.bioconductor.org/packages/3.18/bioc/src/contrib/arrayMvout_1.60.0.tar.gz\",
        \"https://www.bioconductor.org/packages/3.18/bioc/src/contrib/Archive/arrayMvout/arrayMvout_1.60.0.tar.gz\",
    ]

    version(\"1.60.0\", md5=\"7aa46c496dbe47218ea774cb02108800\", preferred=True)
    version(\"1.58.0\", commit=\"6f5bd3d0\", git=\"https://git.bioconductor.org/packages/arrayMvout\")

    depends_on(\"r@2.6:\", type=(\"build\", \"run\"))
    depends_on(\"r-parody\", type=(\"build\", \"run\"))
    depends_on(
        \"r-affy\",  # arrays
        type=(\"build\", \"run\"),
        when=\"@1.58:\",
    )
    depends_on(\"r-lumi\", type=(\"build\", \"run\"))
";

/// Concatenated source text of a token sequence.
pub fn token_text(tokens: &[Token]) -> String {
    tokens.iter().map(|t| t.text.as_str()).collect()
}

/// Concatenated source text of a phrase sequence.
pub fn phrase_text(phrases: &[Phrase]) -> String {
    phrases.iter().map(Phrase::text).collect()
}

/// Tokenize and group, panicking on failure.
pub fn phrases(input: &str) -> Vec<Phrase> {
    let tokens = tokenize(input).expect("tokenize failed");
    group(tokens).expect("group failed")
}

/// Assert that tokens and phrases both reproduce the input exactly.
pub fn assert_lossless(input: &str) {
    let tokens = tokenize(input).expect("tokenize failed");
    assert_eq!(token_text(&tokens), input, "token text mismatch");

    let phrases = group(tokens.clone()).expect("group failed");
    assert_eq!(phrase_text(&phrases), input, "phrase text mismatch");

    let regrouped: Vec<Token> = phrases.into_iter().flat_map(|p| p.tokens).collect();
    assert_eq!(regrouped, tokens, "phrases reordered or dropped tokens");
}
